use super::PeriodArgs;
use crate::{
    db::{clients::Clients, db::Db, entries::Entries},
    libs::{
        config::Config,
        entry::WorkEntry,
        export::write_entries_json,
        formatter::format_period,
        messages::Message,
        period::{filter_by_period, PeriodKind},
        rate::RateBook,
        validate::{ingest, NewWorkEntry},
        view::View,
    },
    msg_error, msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EntryArgs {
    #[command(subcommand)]
    command: EntryCommand,
}

#[derive(Debug, Subcommand)]
enum EntryCommand {
    /// Log a work session
    Add {
        /// Day the session starts (YYYY-MM-DD)
        date: String,
        /// Start time (HH:mm)
        start: String,
        /// End time (HH:mm)
        end: String,
        /// Day the session ends, when it runs past midnight
        #[arg(long)]
        end_date: Option<String>,
        /// Break within the session
        #[arg(short, long = "break", value_name = "HH:MM-HH:MM")]
        pause: Option<String>,
        /// Work category
        #[arg(short, long)]
        category: Option<String>,
        /// Hourly rate for this session
        #[arg(short, long)]
        rate: Option<f64>,
        /// Client id
        #[arg(long)]
        client: Option<String>,
        /// Activity id
        #[arg(long)]
        activity: Option<String>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// List work entries, newest first
    List {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Delete a work entry
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Import work entries from a JSON array
    Import { path: PathBuf },
    /// Export work entries as a JSON array
    Export {
        path: PathBuf,
        #[command(flatten)]
        period: PeriodArgs,
    },
}

pub fn cmd(args: EntryArgs) -> Result<()> {
    let config = Config::read()?;
    let db = Db::from_config(&config)?;

    match args.command {
        EntryCommand::Add {
            date,
            start,
            end,
            end_date,
            pause,
            category,
            rate,
            client,
            activity,
            comment,
        } => {
            let mut payload = NewWorkEntry {
                user_id: Some(config.user_id()),
                end_date: Some(end_date.unwrap_or_else(|| date.clone())),
                start_date: Some(date),
                start_time: Some(start),
                end_time: Some(end),
                category,
                hourly_rate: rate,
                comment,
                ..Default::default()
            };
            if let Some(raw) = pause {
                let (start_hour, start_min, end_hour, end_min) = parse_break(&raw)?;
                payload.has_break = Some(true);
                payload.break_start_hour = Some(start_hour);
                payload.break_start_min = Some(start_min);
                payload.break_end_hour = Some(end_hour);
                payload.break_end_min = Some(end_min);
            }

            let clients = Clients::new(&db.conn);
            for (id, name) in [(&client, &mut payload.client_name), (&activity, &mut payload.activity_name)] {
                if let Some(id) = id {
                    match clients.get(id)? {
                        Some(record) => *name = Some(record.name),
                        None => {
                            msg_error!(Message::ClientNotFound(id.clone()));
                            return Ok(());
                        }
                    }
                }
            }
            payload.client_id = client;
            payload.activity_id = activity;

            let entry = Entries::new(&db.conn).insert(&payload.validate()?)?;
            msg_success!(Message::EntryCreated(entry.id.clone(), entry.duration_hours()));
        }
        EntryCommand::List { period } => {
            let period = period.resolve(PeriodKind::Custom)?;
            let entries = Entries::new(&db.conn).list_by_user(&config.user_id())?;
            let selected: Vec<WorkEntry> = filter_by_period(&entries, &period).into_iter().cloned().collect();

            if selected.is_empty() {
                msg_info!(Message::EntriesNotFound);
                return Ok(());
            }

            let rates = RateBook::new(Clients::new(&db.conn).list_by_user(&config.user_id())?).with_fallback(config.fallback_rate());
            msg_print!(Message::EntriesHeader(format_period(period.from.as_deref(), period.to.as_deref())), true);
            View::entries(&selected, &rates)?;
        }
        EntryCommand::Delete { id, yes } => {
            let entries = Entries::new(&db.conn);
            if entries.get(&id)?.is_none() {
                msg_error!(Message::EntryNotFound(id));
                return Ok(());
            }
            if !yes && !confirm(&id)? {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            entries.delete(&id)?;
            msg_success!(Message::EntryDeleted(id));
        }
        EntryCommand::Import { path } => {
            let records: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path)?)?;
            let user_id = config.user_id();
            let records = records
                .into_iter()
                .map(|mut record| {
                    if let Some(object) = record.as_object_mut() {
                        object.entry("userId").or_insert_with(|| Value::String(user_id.clone()));
                    }
                    record
                })
                .collect();

            let ingested = ingest(records);
            for (index, error) in &ingested.skipped {
                msg_warning!(Message::EntrySkipped(*index, error.to_string()));
            }

            let entries = Entries::new(&db.conn);
            for entry in &ingested.entries {
                match entries.get(&entry.id)? {
                    Some(_) => entries.update(entry)?,
                    None => entries.insert(entry)?,
                };
            }
            msg_success!(Message::EntriesImported(ingested.entries.len(), ingested.skipped.len()));
        }
        EntryCommand::Export { path, period } => {
            let period = period.resolve(PeriodKind::Custom)?;
            let entries = Entries::new(&db.conn).list_by_user(&config.user_id())?;
            let selected: Vec<WorkEntry> = filter_by_period(&entries, &period).into_iter().cloned().collect();
            write_entries_json(&path, &selected)?;
        }
    }

    Ok(())
}

/// Splits `HH:MM-HH:MM` into its four clock components.
pub fn parse_break(raw: &str) -> Result<(String, String, String, String)> {
    let invalid = || msg_error_anyhow!(Message::InvalidBreakRange(raw.to_string()));

    let (start, end) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let (start_hour, start_min) = start.trim().split_once(':').ok_or_else(invalid)?;
    let (end_hour, end_min) = end.trim().split_once(':').ok_or_else(invalid)?;

    let parts = [start_hour, start_min, end_hour, end_min];
    if parts.iter().any(|p| p.is_empty() || p.len() > 2 || !p.chars().all(|c| c.is_ascii_digit())) {
        return Err(invalid());
    }
    Ok((start_hour.to_string(), start_min.to_string(), end_hour.to_string(), end_min.to_string()))
}

fn confirm(id: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptConfirmDelete(id.to_string()).to_string())
        .default(false)
        .interact()?)
}
