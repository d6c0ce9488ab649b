//! Invoice preview: one billable line per work entry plus grand totals.
//!
//! ## Usage
//!
//! ```rust
//! use heures::libs::entry::WorkEntry;
//! use heures::libs::invoice::build_invoice;
//! use heures::libs::period::Period;
//! use heures::libs::rate::RateBook;
//!
//! let entries = vec![WorkEntry::new("u_1", "2025-01-10", "09:00", "2025-01-10", "17:00").with_rate(50.0)];
//! let invoice = build_invoice(&entries, &RateBook::default(), None, Period::all());
//! assert_eq!(invoice.total_amount, 400.0);
//! ```

use crate::libs::duration::round2;
use crate::libs::entry::WorkEntry;
use crate::libs::period::Period;
use crate::libs::rate::{line_amount, RateBook};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub entry_id: String,
    pub date: String,
    pub hours: f64,
    pub rate: f64,
    pub amount: f64,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub from: Option<String>,
    pub to: Option<String>,
    pub total_hours: f64,
    pub total_amount: f64,
    pub lines: Vec<InvoiceLine>,
}

impl Invoice {
    pub fn period(&self) -> Period {
        Period::new(self.from.clone(), self.to.clone())
    }
}

/// Builds invoice lines for `entries`, ordered by date then start time.
///
/// A positive `rate_override` replaces every entry's resolved rate; a zero or
/// negative override is ignored. `period` is echoed on the invoice and does
/// not filter, callers pass entries that are already selected.
pub fn build_invoice<'a, I>(entries: I, rates: &RateBook, rate_override: Option<f64>, period: Period) -> Invoice
where
    I: IntoIterator<Item = &'a WorkEntry>,
{
    let rate_override = rate_override.filter(|r| r.is_finite() && *r > 0.0);

    let mut entries: Vec<&WorkEntry> = entries.into_iter().collect();
    entries.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.start_time.cmp(&b.start_time))
            .then_with(|| a.id.cmp(&b.id))
    });

    let lines: Vec<InvoiceLine> = entries
        .into_iter()
        .map(|entry| {
            let hours = entry.duration_hours();
            let rate = rate_override.unwrap_or_else(|| rates.rate_for(entry));
            InvoiceLine {
                entry_id: entry.id.clone(),
                date: entry.start_date.clone(),
                hours,
                rate,
                amount: line_amount(hours, rate),
                category: entry.category_label().to_string(),
            }
        })
        .collect();

    let total_hours = round2(lines.iter().map(|l| l.hours).sum());
    let total_amount = round2(lines.iter().map(|l| l.amount).sum());

    Invoice {
        from: period.from,
        to: period.to,
        total_hours,
        total_amount,
        lines,
    }
}
