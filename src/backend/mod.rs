//! Access to the agency's REST backend, which owns every record this service
//! reads or writes.

pub mod http;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

use crate::models::{Activity, City, ClientDemand, Hotel, Service, SpecialPackage, Transport};

pub use http::HttpBackend;
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryBackend;

/// A record type served under `/{PATH}` by the backend.
pub trait Resource: Serialize + DeserializeOwned {
    const PATH: &'static str;
}

impl Resource for City {
    const PATH: &'static str = "cities";
}

impl Resource for Hotel {
    const PATH: &'static str = "hotels";
}

impl Resource for Transport {
    const PATH: &'static str = "transports";
}

impl Resource for Activity {
    const PATH: &'static str = "activities";
}

impl Resource for Service {
    const PATH: &'static str = "services";
}

impl Resource for ClientDemand {
    const PATH: &'static str = "demands";
}

impl Resource for SpecialPackage {
    const PATH: &'static str = "special-packages";
}

#[derive(Debug)]
pub enum BackendError {
    HttpError(reqwest::Error),
    StatusError { status: u16, body: String },
    NotFound { resource: &'static str, id: String },
    DecodeError(String),
    InvalidUrl(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::HttpError(err) => write!(f, "HTTP error: {}", err),
            BackendError::StatusError { status, body } => {
                write!(f, "Backend responded with status {}: {}", status, body)
            }
            BackendError::NotFound { resource, id } => write!(f, "{} {} not found", resource, id),
            BackendError::DecodeError(msg) => write!(f, "Failed to decode response: {}", msg),
            BackendError::InvalidUrl(url) => write!(f, "Invalid backend URL: {}", url),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::HttpError(err)
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::DecodeError(err.to_string())
    }
}

/// CRUD over the backend's resources plus the demand mail action.
pub trait TravelBackend {
    async fn list<T: Resource>(&self, query: &[(&str, &str)]) -> Result<Vec<T>, BackendError>;

    async fn get<T: Resource>(&self, id: &str) -> Result<T, BackendError>;

    async fn create<T: Resource>(&self, record: &T) -> Result<T, BackendError>;

    async fn update<T: Resource>(&self, id: &str, record: &T) -> Result<T, BackendError>;

    async fn delete<T: Resource>(&self, id: &str) -> Result<(), BackendError>;

    /// Asks the backend to mail the demand's program to the client.
    async fn send_demand_email(&self, demand_id: &str) -> Result<(), BackendError>;

    async fn ping(&self) -> Result<(), BackendError>;
}
