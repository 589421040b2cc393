use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fruit in the shop inventory. Records are never deleted, only deactivated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Fruit {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Restores a deactivated fruit under a fresh price. Re-adding an existing
    /// name resurrects the old record instead of creating a duplicate, so the
    /// creation timestamp is refreshed as well.
    pub fn reactivate(&mut self, price: Decimal) {
        let now = Utc::now();
        self.price = price;
        self.created_at = now;
        self.updated_at = now;
        self.is_active = true;
    }

    pub fn update(&mut self, name: impl Into<String>, price: Decimal) {
        self.name = name.into();
        self.price = price;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
