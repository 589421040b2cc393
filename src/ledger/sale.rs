use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single sale transaction, referencing its fruit by id. `sale_date` is the
/// moment of sale in the storage base offset (UTC); the reporting engine shifts
/// a copy into the reporting offset before bucketing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub fruit_id: Uuid,
    pub quantity: u32,
    pub total_amount: Decimal,
    pub sale_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Sale {
    pub fn new(
        fruit_id: Uuid,
        quantity: u32,
        total_amount: Decimal,
        sale_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            fruit_id,
            quantity,
            total_amount,
            sale_date,
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    pub fn update(
        &mut self,
        fruit_id: Uuid,
        quantity: u32,
        total_amount: Decimal,
        sale_date: DateTime<Utc>,
    ) {
        self.fruit_id = fruit_id;
        self.quantity = quantity;
        self.total_amount = total_amount;
        self.sale_date = sale_date;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
