pub mod json_backend;

use std::path::Path;

use crate::{errors::ShopError, ledger::ShopLedger};

pub type Result<T> = std::result::Result<T, ShopError>;

/// Abstraction over persistence backends capable of storing shop ledgers.
/// Loading returns every record, active or not; `active` filtering belongs to
/// the services and the reporting engine.
pub trait StorageBackend: Send + Sync {
    fn save(&self, shop: &ShopLedger, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<ShopLedger>;
    fn list_shops(&self) -> Result<Vec<String>>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to the JSON codec when not overridden.
    fn save_to_path(&self, shop: &ShopLedger, path: &Path) -> Result<()> {
        json_backend::save_shop_to_path(shop, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<ShopLedger> {
        json_backend::load_shop_from_path(path)
    }
}

pub use json_backend::JsonStorage;
