use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::window::{Granularity, ReportingWindow};

/// Period buckets a report retains before the oldest is evicted.
pub const RETAINED_PERIODS: usize = 3;

/// Read-only view of one sale as the aggregation engine consumes it. The
/// timestamp must already carry the reporting offset; normalizing is the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub fruit_name: String,
    pub quantity: u32,
    pub total_amount: Decimal,
    pub sold_at: DateTime<FixedOffset>,
    pub active: bool,
}

/// Chronological grouping key. Two sales land in the same bucket iff their
/// shifted timestamps truncate to equal keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    Month { year: i32, month: u32 },
    Day { year: i32, month: u32, day: u32 },
}

impl PeriodKey {
    pub fn from_instant(instant: DateTime<FixedOffset>, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Monthly => PeriodKey::Month {
                year: instant.year(),
                month: instant.month(),
            },
            Granularity::Daily => PeriodKey::Day {
                year: instant.year(),
                month: instant.month(),
                day: instant.day(),
            },
        }
    }

    pub fn label(&self) -> String {
        match self {
            PeriodKey::Month { year, month } => format!("{:04}-{:02}", year, month),
            PeriodKey::Day { year, month, day } => {
                format!("{:04}-{:02}-{:02}", year, month, day)
            }
        }
    }
}

/// Per-fruit subtotal within one bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub amount: Decimal,
    pub quantity: u64,
}

/// One period's accumulated sales, keyed by fruit display name. Fruits sharing
/// a name collapse into a single line item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodBucket {
    pub total: Decimal,
    pub line_items: BTreeMap<String, LineItem>,
}

impl PeriodBucket {
    fn add_sale(&mut self, record: &SaleRecord) {
        let line = self.line_items.entry(record.fruit_name.clone()).or_default();
        line.amount += record.total_amount;
        line.quantity += u64::from(record.quantity);
        self.total += record.total_amount;
    }
}

/// Buckets the active records inside the window into periods of the window's
/// granularity. Returns buckets ascending by key; when more than
/// [`RETAINED_PERIODS`] buckets accumulate, the single chronologically oldest
/// bucket is evicted.
pub fn aggregate(
    records: &[SaleRecord],
    window: &ReportingWindow,
) -> Vec<(PeriodKey, PeriodBucket)> {
    let mut buckets: BTreeMap<PeriodKey, PeriodBucket> = BTreeMap::new();
    for record in records {
        if !record.active || !window.contains(record.sold_at) {
            continue;
        }
        let key = PeriodKey::from_instant(record.sold_at, window.granularity);
        buckets.entry(key).or_default().add_sale(record);
    }
    if buckets.len() > RETAINED_PERIODS {
        buckets.pop_first();
    }
    buckets.into_iter().collect()
}

/// Running total over all active records, independent of any window.
pub fn total_sales(records: &[SaleRecord]) -> Decimal {
    records
        .iter()
        .filter(|record| record.active)
        .fold(Decimal::ZERO, |acc, record| acc + record.total_amount)
}
