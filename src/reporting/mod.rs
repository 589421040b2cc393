//! Rolling sales reporting: window derivation in the fixed reporting offset
//! and bucketed aggregation of sale records.

pub mod aggregate;
pub mod window;

pub use aggregate::{
    aggregate, total_sales, LineItem, PeriodBucket, PeriodKey, SaleRecord, RETAINED_PERIODS,
};
pub use window::{Granularity, ReportWindows, ReportingWindow, REPORTING_OFFSET};
