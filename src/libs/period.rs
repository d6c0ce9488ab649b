//! Date ranges used to select entries for summaries and invoices.
//!
//! Bounds are `YYYY-MM-DD` strings compared lexicographically against an
//! entry's `start_date`, inclusive on both ends. An open bound does not
//! filter.

use crate::libs::entry::WorkEntry;
use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// Monday through Sunday of the reference week
    Week,
    /// First through last day of the reference month
    #[default]
    Month,
    /// January 1 through December 31 of the reference year
    Year,
    /// Caller supplied bounds
    Custom,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl Period {
    pub fn new(from: Option<String>, to: Option<String>) -> Self {
        Self {
            from: non_blank(from),
            to: non_blank(to),
        }
    }

    /// Unbounded period: every entry matches.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from.format(DATE_FORMAT).to_string()),
            to: Some(to.format(DATE_FORMAT).to_string()),
        }
    }

    /// Builds the period for `kind` around `reference`. Custom periods take
    /// `from`/`to` as given; the other kinds ignore them.
    pub fn resolve(kind: PeriodKind, reference: NaiveDate, from: Option<String>, to: Option<String>) -> Self {
        match kind {
            PeriodKind::Week => {
                let monday = reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
                Self::between(monday, monday + Duration::days(6))
            }
            PeriodKind::Month => {
                let first = reference - Duration::days(reference.day0() as i64);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(reference);
                Self::between(first, last)
            }
            PeriodKind::Year => {
                let first = reference - Duration::days(reference.ordinal0() as i64);
                let last = NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap_or(reference);
                Self::between(first, last)
            }
            PeriodKind::Custom => Self::new(from, to),
        }
    }

    /// Same as [`Period::resolve`] with today as the reference date.
    pub fn resolve_today(kind: PeriodKind, from: Option<String>, to: Option<String>) -> Self {
        Self::resolve(kind, Local::now().date_naive(), from, to)
    }

    pub fn contains(&self, date: &str) -> bool {
        if let Some(from) = &self.from {
            if date < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if date > to.as_str() {
                return false;
            }
        }
        true
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// `<from>_<to>` label used in export file names.
    pub fn file_label(&self) -> String {
        format!("{}_{}", self.from.as_deref().unwrap_or("debut"), self.to.as_deref().unwrap_or("fin"))
    }
}

/// Selects the entries whose `start_date` falls inside `period`.
pub fn filter_by_period<'a>(entries: &'a [WorkEntry], period: &Period) -> Vec<&'a WorkEntry> {
    if period.is_unbounded() {
        return entries.iter().collect();
    }
    entries.iter().filter(|e| period.contains(&e.start_date)).collect()
}

/// Parses a `YYYY-MM-DD` reference date, `today` meaning the local date.
pub fn parse_reference(value: &str) -> anyhow::Result<NaiveDate> {
    if value.trim().eq_ignore_ascii_case("today") {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)?)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
