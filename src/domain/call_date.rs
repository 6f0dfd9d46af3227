use chrono::{DateTime, NaiveDate};

/// The day a caller would like to be contacted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallDate(NaiveDate);

impl CallDate {
    /// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp, which is
    /// what a date picker serialising a JS `Date` sends.
    pub fn parse(s: &str) -> Result<CallDate, String> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|timestamp| Self(timestamp.date_naive()))
            .map_err(|_| format!("{} is not a valid date.", s))
    }

    /// e.g. `June 14, 2025`
    pub fn formatted(&self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }
}
