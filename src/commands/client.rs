use crate::{
    db::{clients::Clients, db::Db},
    libs::{client::ClientKind, config::Config, messages::Message, validate::ClientPayload, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ClientArgs {
    #[command(subcommand)]
    command: ClientCommand,
}

#[derive(Debug, Subcommand)]
enum ClientCommand {
    /// Register a client or an activity
    Add {
        name: String,
        /// Record type
        #[arg(short, long, value_enum, default_value = "client")]
        kind: ClientKind,
        /// Default hourly rate
        #[arg(short, long)]
        rate: Option<f64>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        siret: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List clients and activities
    List,
    /// Delete a client or an activity. Entries referencing it are kept.
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: ClientArgs) -> Result<()> {
    let config = Config::read()?;
    let db = Db::from_config(&config)?;
    let clients = Clients::new(&db.conn);

    match args.command {
        ClientCommand::Add {
            name,
            kind,
            rate,
            color,
            address,
            city,
            postal_code,
            siret,
            description,
        } => {
            let payload = ClientPayload {
                name: Some(name),
                kind: Some(kind),
                default_rate: rate,
                color,
                address,
                city,
                postal_code,
                siret,
                description,
            };
            let record = payload.into_record(&config.user_id())?;
            clients.insert(&record)?;
            msg_success!(Message::ClientCreated(record.name));
        }
        ClientCommand::List => {
            let records = clients.list_by_user(&config.user_id())?;
            if records.is_empty() {
                msg_info!(Message::ClientsNotFound);
                return Ok(());
            }
            msg_print!(Message::ClientsHeader, true);
            View::clients(&records)?;
        }
        ClientCommand::Delete { id, yes } => {
            let Some(record) = clients.get(&id)? else {
                msg_error!(Message::ClientNotFound(id));
                return Ok(());
            };
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptConfirmDelete(record.name.clone()).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            clients.delete(&id)?;
            msg_success!(Message::ClientDeleted(id));
        }
    }

    Ok(())
}
