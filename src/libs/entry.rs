//! Work entry record shared by every layer of the application.
//!
//! A [`WorkEntry`] is one logged work session. Dates and times are kept as
//! the `YYYY-MM-DD` / `HH:mm` strings they were entered with: the duration
//! calculator parses them on demand and treats anything unparsable as a
//! zero-length session instead of failing the whole computation.
//!
//! ## Usage
//!
//! ```rust
//! use heures::libs::entry::WorkEntry;
//!
//! let entry = WorkEntry::new("u_1", "2025-01-10", "09:00", "2025-01-10", "17:00")
//!     .with_break("12", "00", "13", "00")
//!     .with_rate(50.0);
//! assert_eq!(entry.category_label(), "Standard");
//! ```

use crate::libs::categories::DEFAULT_CATEGORY;
use crate::libs::duration::compute_duration_hours;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of generated work entry identifiers.
pub const ENTRY_ID_PREFIX: &str = "e_";

/// Optional place where the work happened. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// One logged work session.
///
/// Break components are optional strings interpreted against `start_date`;
/// a missing component reads as `"00"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: String,
    pub user_id: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    #[serde(default)]
    pub has_break: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start_hour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end_hour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl WorkEntry {
    /// Creates an entry with a fresh identifier and no break, rate or category.
    pub fn new(user_id: &str, start_date: &str, start_time: &str, end_date: &str, end_time: &str) -> Self {
        Self {
            id: Self::generate_id(),
            user_id: user_id.to_string(),
            start_date: start_date.to_string(),
            start_time: start_time.to_string(),
            end_date: end_date.to_string(),
            end_time: end_time.to_string(),
            ..Default::default()
        }
    }

    pub fn generate_id() -> String {
        format!("{}{}", ENTRY_ID_PREFIX, Uuid::new_v4().simple())
    }

    pub fn with_break(mut self, start_hour: &str, start_min: &str, end_hour: &str, end_min: &str) -> Self {
        self.has_break = true;
        self.break_start_hour = Some(start_hour.to_string());
        self.break_start_min = Some(start_min.to_string());
        self.break_end_hour = Some(end_hour.to_string());
        self.break_end_min = Some(end_min.to_string());
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.hourly_rate = Some(rate);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Category used for grouping; blank or missing categories read as "Standard".
    pub fn category_label(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// Net worked hours of this entry.
    pub fn duration_hours(&self) -> f64 {
        compute_duration_hours(self)
    }
}

/// Work entry as returned by the REST backend: the stored record plus its
/// computed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryWithDuration {
    #[serde(flatten)]
    pub entry: WorkEntry,
    pub duration_hours: f64,
}

impl From<WorkEntry> for EntryWithDuration {
    fn from(entry: WorkEntry) -> Self {
        let duration_hours = entry.duration_hours();
        Self { entry, duration_hours }
    }
}

/// Sorts entries newest first: `start_date` then `start_time`, both descending.
pub fn sort_newest_first(entries: &mut [WorkEntry]) {
    entries.sort_by(|a, b| b.start_date.cmp(&a.start_date).then_with(|| b.start_time.cmp(&a.start_time)));
}
