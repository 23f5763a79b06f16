use serde::{Deserialize, Serialize};

use super::activity::Activity;
use super::currency::{deserialize_optional_price, Currency};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub transports: Vec<Transport>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Name of the city the hotel is in.
    #[serde(default)]
    pub city: String,
    #[serde(deserialize_with = "deserialize_optional_price", default)]
    pub base_price: Option<f64>,
    #[serde(deserialize_with = "deserialize_optional_price", default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Currency,
}

impl Hotel {
    /// Rate charged per night. A zero base price falls back to `price`.
    pub fn nightly_rate(&self) -> f64 {
        self.base_price
            .filter(|rate| *rate > 0.0)
            .or(self.price)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transport {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    /// Rate per day of use.
    #[serde(deserialize_with = "deserialize_optional_price", default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Currency,
}

impl Transport {
    pub fn daily_rate(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}
