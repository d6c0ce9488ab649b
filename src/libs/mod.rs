//! Core library modules for the heures application.
//!
//! ## Features
//!
//! - **Domain model**: work entries, clients and activities, categories
//! - **Computation**: durations, rate resolution, period selection, summaries, invoices
//! - **Boundary**: payload validation, password and token hashing
//! - **Infrastructure**: configuration, data storage, messaging
//! - **User Interface**: console rendering, data export, formatting
//!
//! ## Usage
//!
//! ```rust
//! use heures::libs::entry::WorkEntry;
//! use heures::libs::rate::RateBook;
//! use heures::libs::summary::SummaryCalculator;
//!
//! let entries = vec![WorkEntry::new("local", "2025-01-06", "09:00", "2025-01-06", "17:00").with_rate(40.0)];
//! let summary = entries.summarize(&RateBook::default());
//! assert_eq!(summary.total_amount, 320.0);
//! ```

pub mod auth;
pub mod categories;
pub mod client;
pub mod config;
pub mod data_storage;
pub mod duration;
pub mod entry;
pub mod export;
pub mod formatter;
pub mod invoice;
pub mod messages;
pub mod period;
pub mod rate;
pub mod summary;
pub mod validate;
pub mod view;
