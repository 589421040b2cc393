use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::{Sale, ShopLedger};

use super::{ServiceError, ServiceResult};

/// Timestamp format accepted in bulk-import rows.
const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const CSV_FIELDS: usize = 4;

pub struct SalesService;

impl SalesService {
    /// Records a sale against an active fruit. The total is always computed
    /// from the current price, never taken from the caller.
    pub fn record_sale(
        shop: &mut ShopLedger,
        fruit_name: &str,
        quantity: u32,
        sale_date: DateTime<Utc>,
    ) -> ServiceResult<Uuid> {
        if quantity == 0 {
            return Err(ServiceError::Invalid(
                "sale quantity must be at least 1".into(),
            ));
        }
        let fruit = shop
            .fruit_by_name(fruit_name)
            .filter(|fruit| fruit.is_active)
            .ok_or_else(|| ServiceError::UnknownFruit(fruit_name.to_string()))?;
        let total_amount = fruit.price * Decimal::from(quantity);
        let fruit_id = fruit.id;

        let id = shop.add_sale(Sale::new(fruit_id, quantity, total_amount, sale_date));
        tracing::info!(fruit = fruit_name, quantity, "recorded sale");
        Ok(id)
    }

    /// Edit-page semantics: the fruit may change, and the total is recomputed
    /// at the fruit's current price.
    pub fn update_sale(
        shop: &mut ShopLedger,
        id: Uuid,
        fruit_name: &str,
        quantity: u32,
        sale_date: DateTime<Utc>,
    ) -> ServiceResult<()> {
        if quantity == 0 {
            return Err(ServiceError::Invalid(
                "sale quantity must be at least 1".into(),
            ));
        }
        let fruit = shop
            .fruit_by_name(fruit_name)
            .filter(|fruit| fruit.is_active)
            .ok_or_else(|| ServiceError::UnknownFruit(fruit_name.to_string()))?;
        let total_amount = fruit.price * Decimal::from(quantity);
        let fruit_id = fruit.id;

        let sale = shop
            .sale_mut(id)
            .ok_or_else(|| ServiceError::Invalid(format!("unknown sale: {id}")))?;
        sale.update(fruit_id, quantity, total_amount, sale_date);
        shop.touch();
        Ok(())
    }

    /// Soft delete: the sale stays in the ledger but disappears from the sales
    /// page and from every report.
    pub fn remove_sale(shop: &mut ShopLedger, id: Uuid) -> ServiceResult<()> {
        let sale = shop
            .sale_mut(id)
            .ok_or_else(|| ServiceError::Invalid(format!("unknown sale: {id}")))?;
        sale.deactivate();
        shop.touch();
        Ok(())
    }

    pub fn active_sales(shop: &ShopLedger) -> Vec<&Sale> {
        shop.active_sales()
    }

    /// Imports sales from CSV text, one `fruit,quantity,total_amount,datetime`
    /// row per line. Rows that fail any check are skipped, never aborting the
    /// rest of the import. Returns the number of imported rows.
    pub fn import_sales_csv(shop: &mut ShopLedger, data: &str) -> ServiceResult<usize> {
        let mut imported = 0;
        for (index, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Self::import_row(shop, line) {
                Ok(()) => imported += 1,
                Err(reason) => {
                    tracing::debug!(row = index + 1, %reason, "skipped sale row");
                }
            }
        }
        tracing::info!(imported, "bulk sale import finished");
        Ok(imported)
    }

    fn import_row(shop: &mut ShopLedger, line: &str) -> Result<(), ServiceError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != CSV_FIELDS {
            return Err(ServiceError::Invalid(format!(
                "expected {CSV_FIELDS} fields, found {}",
                fields.len()
            )));
        }

        let fruit = shop
            .fruit_by_name(fields[0])
            .filter(|fruit| fruit.is_active)
            .ok_or_else(|| ServiceError::UnknownFruit(fields[0].to_string()))?;
        let price = fruit.price;
        let fruit_id = fruit.id;

        let quantity: u32 = fields[1]
            .parse()
            .map_err(|_| ServiceError::Invalid(format!("bad quantity: {}", fields[1])))?;
        let stated_total: Decimal = fields[2]
            .parse()
            .map_err(|_| ServiceError::Invalid(format!("bad amount: {}", fields[2])))?;
        let naive = NaiveDateTime::parse_from_str(fields[3], CSV_DATE_FORMAT)
            .map_err(|_| ServiceError::Invalid(format!("bad sale date: {}", fields[3])))?;
        let sale_date = DateTime::from_naive_utc_and_offset(naive, Utc);

        let expected_total = price * Decimal::from(quantity);
        if stated_total != expected_total {
            return Err(ServiceError::Invalid(format!(
                "total {stated_total} does not match current price ({expected_total})"
            )));
        }

        shop.add_sale(Sale::new(fruit_id, quantity, stated_total, sale_date));
        Ok(())
    }
}
