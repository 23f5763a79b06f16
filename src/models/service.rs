use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::currency::{deserialize_price, Currency};
use super::ValidationError;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Guide,
    TransportGuide,
    CulturalVisit,
    AdventureActivity,
    Wellness,
    Photography,
    Culinary,
}

/// A bookable extra (guide, visit, photo session...) sold at a flat price.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    #[serde(default)]
    pub provider: String,
    #[serde(deserialize_with = "deserialize_price", default)]
    pub price: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Service {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.provider.trim().is_empty() {
            return Err(ValidationError::MissingField("provider"));
        }
        if self.price < 0.0 {
            return Err(ValidationError::NegativePrice(self.price));
        }
        Ok(())
    }
}
