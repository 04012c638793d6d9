//! The scholar aggregate: typed document shape and partial-update merging.

pub mod merge;
pub mod profile;

pub use merge::apply_patch;
pub use profile::ScholarProfile;

pub(crate) mod flexible_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, de::Error};

    /// Dates arrive from forms as `""`, `"YYYY-MM-DD"` or full ISO timestamps.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.date_naive()))
            .map_err(|_| D::Error::custom(format!("invalid date: {raw}")))
    }
}
