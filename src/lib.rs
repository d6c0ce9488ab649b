//! # Heures - work-hours ledger, aggregation and invoicing
//!
//! A command-line utility and REST backend for freelance contractors to log
//! work sessions, bill them against clients and activities, and prepare
//! invoices.
//!
//! ## Features
//!
//! - **Work Entries**: sessions with optional break, category, rate and client
//! - **Duration Calculation**: break-aware, tolerant of malformed input
//! - **Rate Resolution**: entry, activity, client, then a configured fallback
//! - **Summaries**: totals, average per day, per-category and per-date buckets
//! - **Invoices**: preview tables and CSV, JSON and Excel export
//! - **REST Backend**: accounts, bearer-token sessions, per-user data
//!
//! ## Usage
//!
//! ```rust,no_run
//! use heures::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
