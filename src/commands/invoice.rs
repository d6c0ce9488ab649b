//! Local invoice preview.
//!
//! Selects the entries of the period, prices them and prints one line per
//! entry. With `--format` the same invoice is written to CSV, JSON or Excel.

use super::PeriodArgs;
use crate::{
    db::{clients::Clients, db::Db, entries::Entries},
    libs::{
        config::Config,
        export::{ExportFormat, Exporter},
        formatter::format_period,
        invoice::{build_invoice, Invoice},
        messages::Message,
        period::{filter_by_period, PeriodKind},
        rate::RateBook,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InvoiceArgs {
    #[command(flatten)]
    period: PeriodArgs,

    /// Hourly rate applied to every line instead of the resolved rates
    #[arg(short, long)]
    rate: Option<f64>,

    /// Export the invoice in this format
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Output file, `facture_<from>_<to>.<ext>` by default
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: InvoiceArgs) -> Result<()> {
    let config = Config::read()?;
    let db = Db::from_config(&config)?;
    let user_id = config.user_id();

    let period = args.period.resolve(PeriodKind::Month)?;
    let entries = Entries::new(&db.conn).list_by_user(&user_id)?;
    let rates = RateBook::new(Clients::new(&db.conn).list_by_user(&user_id)?).with_fallback(config.fallback_rate());
    let invoice = build_invoice(filter_by_period(&entries, &period), &rates, args.rate, period);

    present(&invoice, args.format, args.output)
}

/// Prints the invoice table and exports it when a format is given. Shared
/// with `remote-invoice`.
pub fn present(invoice: &Invoice, format: Option<ExportFormat>, output: Option<PathBuf>) -> Result<()> {
    if invoice.lines.is_empty() {
        msg_info!(Message::NoEntriesInPeriod);
        return Ok(());
    }

    msg_print!(Message::InvoiceHeader(format_period(invoice.from.as_deref(), invoice.to.as_deref())), true);
    View::invoice(invoice)?;

    if let Some(format) = format {
        msg_info!(Message::ExportingInvoice(format.extension().to_uppercase()));
        Exporter::for_invoice(format, output, invoice).export_invoice(invoice)?;
    }
    Ok(())
}
