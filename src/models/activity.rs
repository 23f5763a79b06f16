use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::currency::{deserialize_price, Currency};
use super::ValidationError;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityCategory {
    Cultural,
    Adventure,
    Wellness,
    Culinary,
    Photography,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub city_id: String,
    #[serde(deserialize_with = "deserialize_price", default)]
    pub price: f64,
    #[serde(default)]
    pub currency: Currency,
    /// Free text as typed by the admin, e.g. "3h" or "half day".
    #[serde(default)]
    pub duration: String,
    pub difficulty: Difficulty,
    pub category: ActivityCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.city_id.trim().is_empty() {
            return Err(ValidationError::MissingField("cityId"));
        }
        if self.price < 0.0 {
            return Err(ValidationError::NegativePrice(self.price));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_from_backend_json() {
        let activity: Activity = serde_json::from_str(
            r#"{
                "id": "act-1",
                "name": "Desert camel ride",
                "cityId": "merzouga",
                "price": 200,
                "currency": "MAD",
                "duration": "2h",
                "difficulty": "EASY",
                "category": "ADVENTURE"
            }"#,
        )
        .unwrap();

        assert_eq!(activity.id.as_deref(), Some("act-1"));
        assert_eq!(activity.price, 200.0);
        assert_eq!(activity.difficulty, Difficulty::Easy);
        assert_eq!(activity.category, ActivityCategory::Adventure);
        assert!(activity.validate().is_ok());
    }

    #[test]
    fn test_activity_requires_city() {
        let activity: Activity = serde_json::from_str(
            r#"{"name": "Cooking class", "cityId": " ", "difficulty": "MODERATE", "category": "CULINARY"}"#,
        )
        .unwrap();

        assert!(matches!(
            activity.validate(),
            Err(ValidationError::MissingField("cityId"))
        ));
    }

    #[test]
    fn test_activity_rejects_negative_price() {
        let activity: Activity = serde_json::from_str(
            r#"{"name": "Quad ride", "cityId": "merzouga", "price": -10, "difficulty": "HARD", "category": "ADVENTURE"}"#,
        )
        .unwrap();

        assert!(matches!(
            activity.validate(),
            Err(ValidationError::NegativePrice(_))
        ));
    }
}
