use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::currency::Currency;
use super::dates::DateRange;
use super::ValidationError;

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageStatus::Draft => write!(f, "DRAFT"),
            PackageStatus::Published => write!(f, "PUBLISHED"),
            PackageStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}

/// An admin-curated bundle sold at a discount.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SpecialPackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub hotels: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub transport: Option<String>,
    #[serde(default)]
    pub city_dates: BTreeMap<String, DateRange>,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub final_price: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub status: PackageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// The dashboard sends "" for "no transport".
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|id| !id.trim().is_empty()))
}

/// One change made in the package form.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PackageEdit {
    ToggleCity {
        city_id: String,
    },
    ToggleHotel {
        hotel_id: String,
    },
    ToggleActivity {
        activity_id: String,
    },
    ToggleService {
        service_id: String,
    },
    SetTransport {
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        transport_id: Option<String>,
    },
    SetCityDates {
        city_id: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    SetDiscount {
        discount_percent: f64,
    },
    SetStatus {
        status: PackageStatus,
    },
    SetFeatured {
        featured: bool,
    },
    SetCurrency {
        currency: Currency,
    },
    Rename {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl SpecialPackage {
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        self.normalize()
    }

    /// Checks everything pricing depends on. Drafts being quoted only need
    /// this, not a title.
    pub fn normalize(&mut self) -> Result<(), ValidationError> {
        validate_discount(self.discount_percent)?;

        dedup_in_place(&mut self.cities);
        dedup_in_place(&mut self.hotels);
        dedup_in_place(&mut self.activities);
        dedup_in_place(&mut self.services);

        let cities = &self.cities;
        self.city_dates.retain(|city_id, _| cities.contains(city_id));
        for dates in self.city_dates.values_mut() {
            *dates = dates.normalized()?;
        }
        Ok(())
    }

    pub fn apply(&mut self, edit: PackageEdit) -> Result<(), ValidationError> {
        match edit {
            PackageEdit::ToggleCity { city_id } => {
                if !toggle(&mut self.cities, city_id.clone()) {
                    self.city_dates.remove(&city_id);
                }
            }
            PackageEdit::ToggleHotel { hotel_id } => {
                toggle(&mut self.hotels, hotel_id);
            }
            PackageEdit::ToggleActivity { activity_id } => {
                toggle(&mut self.activities, activity_id);
            }
            PackageEdit::ToggleService { service_id } => {
                toggle(&mut self.services, service_id);
            }
            PackageEdit::SetTransport { transport_id } => self.transport = transport_id,
            PackageEdit::SetCityDates {
                city_id,
                start_date,
                end_date,
            } => {
                if !self.cities.contains(&city_id) {
                    return Err(ValidationError::CityNotInPackage(city_id));
                }
                let range = DateRange::new(start_date, end_date)?;
                self.city_dates.insert(city_id, range);
            }
            PackageEdit::SetDiscount { discount_percent } => {
                validate_discount(discount_percent)?;
                self.discount_percent = discount_percent;
            }
            PackageEdit::SetStatus { status } => self.status = status,
            PackageEdit::SetFeatured { featured } => self.featured = featured,
            PackageEdit::SetCurrency { currency } => self.currency = currency,
            PackageEdit::Rename { title, description } => {
                if let Some(title) = title {
                    if title.trim().is_empty() {
                        return Err(ValidationError::MissingField("title"));
                    }
                    self.title = title;
                }
                if let Some(description) = description {
                    self.description = description;
                }
            }
        }
        Ok(())
    }

    /// Nights covered by the included cities' date ranges.
    pub fn total_days(&self) -> u32 {
        self.city_dates
            .iter()
            .filter(|(city_id, _)| self.cities.contains(city_id))
            .map(|(_, dates)| dates.duration)
            .sum()
    }
}

pub fn validate_discount(discount_percent: f64) -> Result<(), ValidationError> {
    if discount_percent.is_finite() && (0.0..=100.0).contains(&discount_percent) {
        Ok(())
    } else {
        Err(ValidationError::DiscountOutOfRange(discount_percent))
    }
}

/// Adds `id` if absent, removes it otherwise. Returns whether it is now
/// included.
fn toggle(ids: &mut Vec<String>, id: String) -> bool {
    if let Some(pos) = ids.iter().position(|existing| *existing == id) {
        ids.remove(pos);
        false
    } else {
        ids.push(id);
        true
    }
}

fn dedup_in_place(ids: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(ids.len());
    ids.retain(|id| {
        if id.is_empty() || seen.contains(id) {
            false
        } else {
            seen.push(id.clone());
            true
        }
    });
}
