use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A stay in one city. `duration` is the number of nights between the two
/// dates and is always derived from them.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub duration: u32,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ValidationError> {
        if end_date < start_date {
            return Err(ValidationError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            start_date,
            end_date,
            duration: days_between(start_date, end_date),
        })
    }

    /// Re-derives `duration` from the dates, ignoring whatever was sent.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        Self::new(self.start_date, self.end_date)
    }
}

pub fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    u32::try_from((end - start).num_days()).unwrap_or(0)
}
