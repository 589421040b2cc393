use chrono::{TimeZone, Utc};
use fruitshop_core::ledger::ShopLedger;
use fruitshop_core::reporting::{PeriodKey, ReportWindows, REPORTING_OFFSET};
use fruitshop_core::services::{InventoryService, ReportService, SalesService};
use rust_decimal_macros::dec;

#[test]
fn test_windows_from_frozen_reference() {
    // 03:00 UTC on 2024-01-20 is noon of the same day at +9.
    let reference = Utc.with_ymd_and_hms(2024, 1, 20, 3, 0, 0).unwrap();
    let windows = ReportWindows::from_reference(reference);

    assert_eq!(
        windows.end_of_day,
        REPORTING_OFFSET
            .with_ymd_and_hms(2024, 1, 20, 23, 59, 59)
            .unwrap()
    );
    assert_eq!(
        windows.monthly_start,
        REPORTING_OFFSET
            .with_ymd_and_hms(2023, 11, 1, 0, 0, 0)
            .unwrap()
    );
    assert_eq!(
        windows.daily_start,
        REPORTING_OFFSET
            .with_ymd_and_hms(2024, 1, 18, 0, 0, 0)
            .unwrap()
    );
}

#[test]
fn test_dashboard_flow_through_the_services() {
    let mut shop = ShopLedger::new("Station Kiosk");
    InventoryService::add_fruit(&mut shop, "apple", dec!(100)).unwrap();
    InventoryService::add_fruit(&mut shop, "pear", dec!(150)).unwrap();

    SalesService::record_sale(
        &mut shop,
        "apple",
        2,
        Utc.with_ymd_and_hms(2023, 12, 5, 3, 0, 0).unwrap(),
    )
    .unwrap();
    SalesService::record_sale(
        &mut shop,
        "apple",
        3,
        Utc.with_ymd_and_hms(2024, 1, 10, 3, 0, 0).unwrap(),
    )
    .unwrap();
    SalesService::record_sale(
        &mut shop,
        "pear",
        2,
        Utc.with_ymd_and_hms(2024, 2, 18, 3, 0, 0).unwrap(),
    )
    .unwrap();
    // Outside the monthly window entirely, but part of the running total.
    SalesService::record_sale(
        &mut shop,
        "pear",
        1,
        Utc.with_ymd_and_hms(2023, 6, 1, 3, 0, 0).unwrap(),
    )
    .unwrap();

    let now = Utc.with_ymd_and_hms(2024, 2, 20, 3, 0, 0).unwrap();
    let report = ReportService::sales_report(&shop, now).unwrap();

    assert_eq!(report.total_sales, dec!(950));

    let monthly_keys: Vec<&PeriodKey> = report.monthly.iter().map(|(key, _)| key).collect();
    assert_eq!(
        monthly_keys,
        vec![
            &PeriodKey::Month {
                year: 2024,
                month: 2
            },
            &PeriodKey::Month {
                year: 2024,
                month: 1
            },
            &PeriodKey::Month {
                year: 2023,
                month: 12
            },
        ]
    );
    assert_eq!(report.monthly[0].1.total, dec!(300));
    assert_eq!(report.monthly[1].1.total, dec!(300));
    assert_eq!(report.monthly[2].1.total, dec!(200));

    // Only the February 18th sale falls inside the daily window.
    assert_eq!(report.daily.len(), 1);
    assert_eq!(
        report.daily[0].0,
        PeriodKey::Day {
            year: 2024,
            month: 2,
            day: 18
        }
    );
}

#[test]
fn test_bulk_import_feeds_the_report() {
    let mut shop = ShopLedger::new("Station Kiosk");
    InventoryService::add_fruit(&mut shop, "apple", dec!(100)).unwrap();

    let data = "\
apple,2,200,2024-01-18 09:30
apple,1,100,2024-01-19 10:15
grape,5,900,2024-01-19 11:00
apple,1,150,2024-01-19 12:00
";
    let imported = SalesService::import_sales_csv(&mut shop, data).unwrap();
    assert_eq!(imported, 2);

    let now = Utc.with_ymd_and_hms(2024, 1, 20, 3, 0, 0).unwrap();
    let report = ReportService::sales_report(&shop, now).unwrap();
    assert_eq!(report.total_sales, dec!(300));
    assert_eq!(report.daily.len(), 2);
    assert_eq!(report.daily[0].0.label(), "2024-01-19");
    assert_eq!(report.daily[1].0.label(), "2024-01-18");
}

#[test]
fn test_year_boundary_report() {
    let mut shop = ShopLedger::new("Station Kiosk");
    InventoryService::add_fruit(&mut shop, "apple", dec!(100)).unwrap();
    SalesService::record_sale(
        &mut shop,
        "apple",
        1,
        Utc.with_ymd_and_hms(2023, 12, 30, 3, 0, 0).unwrap(),
    )
    .unwrap();
    SalesService::record_sale(
        &mut shop,
        "apple",
        1,
        Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap(),
    )
    .unwrap();

    // New Year's Day: the daily window reaches back into December.
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
    let report = ReportService::sales_report(&shop, now).unwrap();

    assert_eq!(report.daily.len(), 2);
    assert_eq!(report.daily[0].0.label(), "2024-01-01");
    assert_eq!(report.daily[1].0.label(), "2023-12-30");

    let monthly_keys: Vec<String> = report
        .monthly
        .iter()
        .map(|(key, _)| key.label())
        .collect();
    assert_eq!(monthly_keys, vec!["2024-01", "2023-12"]);
}
