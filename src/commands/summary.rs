use super::PeriodArgs;
use crate::{
    db::{clients::Clients, db::Db, entries::Entries},
    libs::{
        config::Config,
        formatter::format_period,
        messages::Message,
        period::{filter_by_period, PeriodKind},
        rate::RateBook,
        summary::aggregate,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    period: PeriodArgs,

    /// Rate for entries without one, overrides the configured fallback
    #[arg(short, long)]
    rate: Option<f64>,
}

pub fn cmd(args: SummaryArgs) -> Result<()> {
    let config = Config::read()?;
    let db = Db::from_config(&config)?;
    let user_id = config.user_id();

    let period = args.period.resolve(PeriodKind::Month)?;
    let entries = Entries::new(&db.conn).list_by_user(&user_id)?;
    let selected = filter_by_period(&entries, &period);

    if selected.is_empty() {
        msg_info!(Message::NoEntriesInPeriod);
        return Ok(());
    }

    let fallback = args.rate.unwrap_or(config.fallback_rate());
    let rates = RateBook::new(Clients::new(&db.conn).list_by_user(&user_id)?).with_fallback(fallback);
    let summary = aggregate(selected, &rates);

    msg_print!(Message::SummaryHeader(format_period(period.from.as_deref(), period.to.as_deref())), true);
    View::summary(&summary)?;

    Ok(())
}
