use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::dates::DateRange;
use super::ValidationError;

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum DemandStatus {
    #[default]
    Pending,
    Validated,
    Sent,
}

impl fmt::Display for DemandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandStatus::Pending => write!(f, "PENDING"),
            DemandStatus::Validated => write!(f, "VALIDATED"),
            DemandStatus::Sent => write!(f, "SENT"),
        }
    }
}

/// One stop of a client's itinerary. The client picks the city, dates and
/// activities; the admin assigns hotel, transport and services.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CitySelection {
    pub city_id: String,
    #[serde(flatten)]
    pub dates: DateRange,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_id: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub price: f64,
}

impl CitySelection {
    pub fn duration(&self) -> u32 {
        self.dates.duration
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClientDemand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub client_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_travelers")]
    pub number_of_travelers: u32,
    #[serde(default)]
    pub trip_period: u32,
    #[serde(default)]
    pub cities: Vec<CitySelection>,
    #[serde(default)]
    pub status: DemandStatus,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_travelers() -> u32 {
    1
}

impl ClientDemand {
    /// Checks required fields, re-derives every city's duration from its
    /// dates and drops repeated activity or service ids.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.client_name.trim().is_empty() {
            return Err(ValidationError::MissingField("clientName"));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if self.number_of_travelers == 0 {
            return Err(ValidationError::MissingField("numberOfTravelers"));
        }
        if self.cities.is_empty() {
            return Err(ValidationError::MissingField("cities"));
        }
        for selection in self.cities.iter_mut() {
            if selection.city_id.trim().is_empty() {
                return Err(ValidationError::MissingField("cityId"));
            }
            selection.dates = selection.dates.normalized()?;
            selection.activities = dedup(std::mem::take(&mut selection.activities));
            selection.services = dedup(std::mem::take(&mut selection.services));
        }
        Ok(())
    }

    pub fn city_mut(&mut self, city_id: &str) -> Option<&mut CitySelection> {
        self.cities.iter_mut().find(|c| c.city_id == city_id)
    }

    pub fn city(&self, city_id: &str) -> Option<&CitySelection> {
        self.cities.iter().find(|c| c.city_id == city_id)
    }
}

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    )
    .ok()
});

fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StatusUpdate {
    pub status: DemandStatus,
}

/// Admin edit of one city of a demand. Absent fields are left alone; an empty
/// hotel or transport id clears the assignment.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityAssignment {
    #[serde(default)]
    pub hotel_id: Option<String>,
    #[serde(default)]
    pub transport_id: Option<String>,
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default)]
    pub activities: Option<Vec<String>>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl CityAssignment {
    pub fn apply_to(self, selection: &mut CitySelection) -> Result<(), ValidationError> {
        if self.start_date.is_some() || self.end_date.is_some() {
            selection.dates = DateRange::new(
                self.start_date.unwrap_or(selection.dates.start_date),
                self.end_date.unwrap_or(selection.dates.end_date),
            )?;
        }
        if let Some(hotel_id) = self.hotel_id {
            selection.hotel_id = non_empty(hotel_id);
        }
        if let Some(transport_id) = self.transport_id {
            selection.transport_id = non_empty(transport_id);
        }
        if let Some(services) = self.services {
            selection.services = dedup(services);
        }
        if let Some(activities) = self.activities {
            selection.activities = dedup(activities);
        }
        Ok(())
    }
}

fn non_empty(id: String) -> Option<String> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !id.is_empty() && !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
