use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Three-letter currency code attached to every price field.
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Mad,
    Eur,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Mad => "MAD",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// Activity and service prices, as numbers, numeric strings or null. Null and
// unparseable values count as zero; a negative number is kept so validation
// can reject it.
pub fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value).unwrap_or(0.0))
}

// Hotel and transport rates read from the backend. Anything that is not a
// usable non-negative number is treated as absent.
pub fn deserialize_optional_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|price| *price >= 0.0))
}

fn number_from_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|price| price.is_finite())
}
