use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{fruit::Fruit, sale::Sale};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Aggregate root for one shop: its inventory and its sales history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopLedger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub fruits: Vec<Fruit>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "ShopLedger::schema_version_default")]
    pub schema_version: u8,
}

impl ShopLedger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            fruits: Vec::new(),
            sales: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_fruit(&mut self, fruit: Fruit) -> Uuid {
        let id = fruit.id;
        self.fruits.push(fruit);
        self.touch();
        id
    }

    pub fn add_sale(&mut self, sale: Sale) -> Uuid {
        let id = sale.id;
        self.sales.push(sale);
        self.touch();
        id
    }

    pub fn fruit(&self, id: Uuid) -> Option<&Fruit> {
        self.fruits.iter().find(|fruit| fruit.id == id)
    }

    pub fn fruit_mut(&mut self, id: Uuid) -> Option<&mut Fruit> {
        self.fruits.iter_mut().find(|fruit| fruit.id == id)
    }

    pub fn fruit_by_name(&self, name: &str) -> Option<&Fruit> {
        self.fruits.iter().find(|fruit| fruit.name == name)
    }

    pub fn fruit_by_name_mut(&mut self, name: &str) -> Option<&mut Fruit> {
        self.fruits.iter_mut().find(|fruit| fruit.name == name)
    }

    pub fn sale(&self, id: Uuid) -> Option<&Sale> {
        self.sales.iter().find(|sale| sale.id == id)
    }

    pub fn sale_mut(&mut self, id: Uuid) -> Option<&mut Sale> {
        self.sales.iter_mut().find(|sale| sale.id == id)
    }

    /// Active inventory, newest first, as shown on the inventory page.
    pub fn active_fruits(&self) -> Vec<&Fruit> {
        let mut fruits: Vec<&Fruit> = self.fruits.iter().filter(|f| f.is_active).collect();
        fruits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        fruits
    }

    /// Active sales, most recent sale first, as shown on the sales page.
    pub fn active_sales(&self) -> Vec<&Sale> {
        let mut sales: Vec<&Sale> = self.sales.iter().filter(|s| s.is_active).collect();
        sales.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));
        sales
    }

    pub fn sale_count(&self) -> usize {
        self.sales.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
