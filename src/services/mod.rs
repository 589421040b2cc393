pub mod inventory_service;
pub mod report_service;
pub mod sales_service;

pub use inventory_service::InventoryService;
pub use report_service::{ReportService, SalesReport};
pub use sales_service::SalesService;

use crate::errors::ShopError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Shop(#[from] ShopError),
    #[error("unknown fruit: {0}")]
    UnknownFruit(String),
    #[error("{0}")]
    Invalid(String),
}
