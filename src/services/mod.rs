pub mod catalog;
pub mod demand_service;
pub mod package_service;
pub mod pricing_service;
pub mod stats_service;

use std::fmt;

use crate::backend::BackendError;
use crate::models::ValidationError;

pub use catalog::Catalog;
pub use demand_service::DemandService;
pub use package_service::PackageService;
pub use pricing_service::PricingService;
pub use stats_service::StatsService;

#[derive(Debug)]
pub enum ServiceError {
    Backend(BackendError),
    Validation(ValidationError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Backend(err) => write!(f, "{}", err),
            ServiceError::Validation(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<BackendError> for ServiceError {
    fn from(err: BackendError) -> Self {
        ServiceError::Backend(err)
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err)
    }
}
