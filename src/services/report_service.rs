use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::ShopLedger;
use crate::reporting::{
    aggregate, total_sales, PeriodBucket, PeriodKey, ReportWindows, SaleRecord, REPORTING_OFFSET,
};

use super::ServiceResult;

/// Aggregated dashboard report: the overall running total plus the rolling
/// monthly and daily bucket lists, newest period first.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub total_sales: Decimal,
    pub monthly: Vec<(PeriodKey, PeriodBucket)>,
    pub daily: Vec<(PeriodKey, PeriodBucket)>,
}

pub struct ReportService;

impl ReportService {
    /// Builds the report windows from `now`, aggregates once per granularity,
    /// and re-sorts each bucket list descending for display.
    pub fn sales_report(shop: &ShopLedger, now: DateTime<Utc>) -> ServiceResult<SalesReport> {
        let windows = ReportWindows::from_reference(now);
        let records = Self::normalized_records(shop);

        let total = total_sales(&records);
        let mut monthly = aggregate(&records, &windows.monthly()?);
        monthly.reverse();
        let mut daily = aggregate(&records, &windows.daily()?);
        daily.reverse();

        Ok(SalesReport {
            total_sales: total,
            monthly,
            daily,
        })
    }

    /// Resolves each sale's fruit name and shifts its timestamp into the
    /// reporting offset. This is the normalization step the aggregation engine
    /// requires of its input; sales pointing at a missing fruit are skipped.
    pub fn normalized_records(shop: &ShopLedger) -> Vec<SaleRecord> {
        shop.sales
            .iter()
            .filter_map(|sale| {
                let fruit = match shop.fruit(sale.fruit_id) {
                    Some(fruit) => fruit,
                    None => {
                        tracing::warn!(sale = %sale.id, "sale references unknown fruit, skipping");
                        return None;
                    }
                };
                Some(SaleRecord {
                    fruit_name: fruit.name.clone(),
                    quantity: sale.quantity,
                    total_amount: sale.total_amount,
                    sold_at: sale.sale_date.with_timezone(&*REPORTING_OFFSET),
                    active: sale.is_active,
                })
            })
            .collect()
    }
}
