use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::{Fruit, ShopLedger};

use super::{ServiceError, ServiceResult};

pub struct InventoryService;

impl InventoryService {
    /// Adds a fruit to the inventory. Re-adding a name that already exists
    /// reactivates the old record with the new price instead of duplicating it.
    pub fn add_fruit(shop: &mut ShopLedger, name: &str, price: Decimal) -> ServiceResult<Uuid> {
        let name = validated_name(name)?;
        validate_price(price)?;

        if let Some(existing) = shop.fruit_by_name_mut(&name) {
            existing.reactivate(price);
            let id = existing.id;
            shop.touch();
            tracing::info!(fruit = %name, "reactivated existing fruit");
            return Ok(id);
        }

        let id = shop.add_fruit(Fruit::new(name, price));
        Ok(id)
    }

    pub fn update_fruit(
        shop: &mut ShopLedger,
        id: Uuid,
        name: &str,
        price: Decimal,
    ) -> ServiceResult<()> {
        let name = validated_name(name)?;
        validate_price(price)?;

        let fruit = shop
            .fruit_mut(id)
            .ok_or_else(|| ServiceError::UnknownFruit(id.to_string()))?;
        fruit.update(name, price);
        shop.touch();
        Ok(())
    }

    /// Soft delete: the record stays in the ledger but disappears from the
    /// inventory page and from every report.
    pub fn remove_fruit(shop: &mut ShopLedger, id: Uuid) -> ServiceResult<()> {
        let fruit = shop
            .fruit_mut(id)
            .ok_or_else(|| ServiceError::UnknownFruit(id.to_string()))?;
        fruit.deactivate();
        shop.touch();
        Ok(())
    }

    pub fn active_fruits(shop: &ShopLedger) -> Vec<&Fruit> {
        shop.active_fruits()
    }
}

fn validated_name(name: &str) -> ServiceResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Invalid("fruit name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: Decimal) -> ServiceResult<()> {
    if price <= Decimal::ZERO {
        return Err(ServiceError::Invalid("fruit price must be positive".into()));
    }
    Ok(())
}
