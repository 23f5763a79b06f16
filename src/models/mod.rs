pub mod activity;
pub mod city;
pub mod currency;
pub mod dates;
pub mod demand;
pub mod service;
pub mod special_package;

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

pub use activity::Activity;
pub use city::{City, Hotel, Transport};
pub use currency::Currency;
pub use dates::DateRange;
pub use demand::{CityAssignment, CitySelection, ClientDemand, DemandStatus};
pub use service::Service;
pub use special_package::{PackageEdit, PackageStatus, SpecialPackage};

/// Input rejected before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidEmail(String),
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    DiscountOutOfRange(f64),
    NegativePrice(f64),
    CityNotInPackage(String),
    CityNotInDemand(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ValidationError::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            ValidationError::InvalidDateRange { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
            ValidationError::DiscountOutOfRange(value) => {
                write!(f, "Discount must be between 0 and 100, got {}", value)
            }
            ValidationError::NegativePrice(value) => {
                write!(f, "Price must not be negative, got {}", value)
            }
            ValidationError::CityNotInPackage(city_id) => {
                write!(f, "City {} is not part of the package", city_id)
            }
            ValidationError::CityNotInDemand(city_id) => {
                write!(f, "City {} is not part of the demand", city_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// List endpoints answer either with a bare array or wrapped in a page
/// (`content`) or collection (`items`) object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Page { content: Vec<T> },
    Collection { items: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Page { content } => content,
            ListResponse::Collection { items } => items,
            ListResponse::Plain(list) => list,
        }
    }
}
