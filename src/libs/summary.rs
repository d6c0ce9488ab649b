//! Totals over a set of work entries.
//!
//! Amounts are rounded per entry before they are summed, so a category or
//! date total always equals the sum of the amounts shown on its lines.

use crate::libs::duration::{round1, round2};
use crate::libs::entry::WorkEntry;
use crate::libs::rate::{line_amount, RateBook};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub hours: f64,
    pub amount: f64,
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub hours: f64,
    pub amount: f64,
    pub entries: usize,
}

/// Stat cards and breakdowns for a set of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_hours: f64,
    pub total_amount: f64,
    pub unique_days: usize,
    pub avg_hours_per_day: f64,
    /// Sorted by amount descending, then by name.
    pub by_category: Vec<CategoryTotal>,
    pub by_date: BTreeMap<String, DayTotal>,
}

pub trait SummaryCalculator {
    fn summarize(&self, rates: &RateBook) -> Summary;
}

impl SummaryCalculator for [WorkEntry] {
    fn summarize(&self, rates: &RateBook) -> Summary {
        aggregate(self, rates)
    }
}

impl SummaryCalculator for [&WorkEntry] {
    fn summarize(&self, rates: &RateBook) -> Summary {
        aggregate(self.iter().copied(), rates)
    }
}

/// Aggregates entries into totals, per-category and per-date buckets.
pub fn aggregate<'a, I>(entries: I, rates: &RateBook) -> Summary
where
    I: IntoIterator<Item = &'a WorkEntry>,
{
    let mut total_hours = 0.0;
    let mut total_amount = 0.0;
    let mut by_date: BTreeMap<String, DayTotal> = BTreeMap::new();
    let mut categories: HashMap<String, DayTotal> = HashMap::new();

    for entry in entries {
        let hours = entry.duration_hours();
        let amount = line_amount(hours, rates.rate_for(entry));

        total_hours += hours;
        total_amount += amount;

        for bucket in [
            by_date.entry(entry.start_date.clone()).or_default(),
            categories.entry(entry.category_label().to_string()).or_default(),
        ] {
            bucket.hours += hours;
            bucket.amount += amount;
            bucket.entries += 1;
        }
    }

    for day in by_date.values_mut() {
        day.hours = round2(day.hours);
        day.amount = round2(day.amount);
    }

    let mut by_category: Vec<CategoryTotal> = categories
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            hours: round1(total.hours),
            amount: round2(total.amount),
            entries: total.entries,
        })
        .collect();
    by_category.sort_by(|a, b| b.amount.total_cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));

    let unique_days = by_date.len();
    let total_hours = round2(total_hours);
    let avg_hours_per_day = if unique_days == 0 { 0.0 } else { round2(total_hours / unique_days as f64) };

    Summary {
        total_hours,
        total_amount: round2(total_amount),
        unique_days,
        avg_hours_per_day,
        by_category,
        by_date,
    }
}
