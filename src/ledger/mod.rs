//! Shop ledger domain models: inventory records, sale transactions, and the
//! aggregate root that owns both collections.

pub mod fruit;
pub mod sale;
#[allow(clippy::module_inception)]
pub mod shop;

pub use fruit::Fruit;
pub use sale::Sale;
pub use shop::ShopLedger;
