use super::{current_session, invoice::present, PeriodArgs};
use crate::libs::{export::ExportFormat, period::PeriodKind};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RemoteInvoiceArgs {
    #[command(flatten)]
    period: PeriodArgs,

    /// Hourly rate applied to every line instead of the resolved rates
    #[arg(short, long)]
    rate: Option<f64>,

    /// Export the invoice in this format
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Same as `invoice`, computed by the server from the account's entries.
pub async fn cmd(args: RemoteInvoiceArgs) -> Result<()> {
    let Some((_, client)) = current_session()? else {
        return Ok(());
    };

    let period = args.period.resolve(PeriodKind::Month)?;
    let preview = client.invoice_preview(period.from.as_deref(), period.to.as_deref(), args.rate).await?;
    tracing::debug!(user_id = %preview.user_id, lines = preview.invoice.lines.len(), "remote invoice received");

    present(&preview.invoice, args.format, args.output)
}
