//! Effective hourly rate of a work entry.
//!
//! Precedence, first positive value wins:
//!
//! 1. the entry's own `hourly_rate`
//! 2. the linked activity's `default_rate`
//! 3. the linked client's `default_rate`
//! 4. the fallback rate (0 unless configured)
//!
//! A missing rate is never an error.

use crate::libs::client::ClientRecord;
use crate::libs::duration::round2;
use crate::libs::entry::WorkEntry;
use std::collections::HashMap;

/// Resolves the rate of `entry` with a zero fallback.
pub fn resolve_rate(entry: &WorkEntry, client: Option<&ClientRecord>, activity: Option<&ClientRecord>) -> f64 {
    resolve_rate_or(entry, client, activity, 0.0)
}

pub fn resolve_rate_or(entry: &WorkEntry, client: Option<&ClientRecord>, activity: Option<&ClientRecord>, fallback: f64) -> f64 {
    positive(entry.hourly_rate)
        .or_else(|| positive(activity.and_then(|a| a.default_rate)))
        .or_else(|| positive(client.and_then(|c| c.default_rate)))
        .unwrap_or(fallback)
}

/// Billed amount of one line: `hours * rate` rounded to cents.
pub fn line_amount(hours: f64, rate: f64) -> f64 {
    round2(hours * rate)
}

fn positive(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r > 0.0)
}

/// Snapshot of the client/activity registry used to resolve rates in bulk.
#[derive(Debug, Clone, Default)]
pub struct RateBook {
    records: HashMap<String, ClientRecord>,
    fallback: f64,
}

impl RateBook {
    pub fn new(records: impl IntoIterator<Item = ClientRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
            fallback: 0.0,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = positive(Some(fallback)).unwrap_or(0.0);
        self
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    pub fn get(&self, id: &str) -> Option<&ClientRecord> {
        self.records.get(id)
    }

    pub fn rate_for(&self, entry: &WorkEntry) -> f64 {
        let client = entry.client_id.as_deref().and_then(|id| self.get(id));
        let activity = entry.activity_id.as_deref().and_then(|id| self.get(id));
        resolve_rate_or(entry, client, activity, self.fallback)
    }
}
