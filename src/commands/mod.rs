pub mod category;
pub mod client;
pub mod entry;
pub mod init;
pub mod invoice;
pub mod login;
pub mod logout;
pub mod remote_invoice;
pub mod serve;
pub mod signup;
pub mod summary;
pub mod whoami;

use crate::api::{ApiClient, Session, SessionStore};
use crate::libs::messages::Message;
use crate::libs::period::{parse_reference, Period, PeriodKind};
use crate::libs::validate::period_bound;
use crate::{msg_error_anyhow, msg_info};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Run the REST backend")]
    Serve(serve::ServeArgs),
    #[command(about = "Manage work entries")]
    Entry(entry::EntryArgs),
    #[command(about = "Manage clients and activities")]
    Client(client::ClientArgs),
    #[command(about = "Manage work categories")]
    Category(category::CategoryArgs),
    #[command(about = "Hours and amounts for a period")]
    Summary(summary::SummaryArgs),
    #[command(about = "Invoice preview for a period, with optional export")]
    Invoice(invoice::InvoiceArgs),
    #[command(about = "Create an account on the remote API")]
    Signup(signup::SignupArgs),
    #[command(about = "Log in to the remote API")]
    Login(login::LoginArgs),
    #[command(about = "Log out of the remote API")]
    Logout,
    #[command(about = "Show the account of the current session")]
    Whoami,
    #[command(about = "Invoice preview computed by the remote API")]
    RemoteInvoice(remote_invoice::RemoteInvoiceArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Entry(args) => entry::cmd(args),
            Commands::Client(args) => client::cmd(args),
            Commands::Category(args) => category::cmd(args),
            Commands::Summary(args) => summary::cmd(args),
            Commands::Invoice(args) => invoice::cmd(args),
            Commands::Signup(args) => signup::cmd(args).await,
            Commands::Login(args) => login::cmd(args).await,
            Commands::Logout => logout::cmd().await,
            Commands::Whoami => whoami::cmd().await,
            Commands::RemoteInvoice(args) => remote_invoice::cmd(args).await,
        }
    }

    /// Whether the parsed command runs the server, which logs at `info` by
    /// default.
    pub fn is_serve() -> bool {
        std::env::args().nth(1).is_some_and(|arg| arg == "serve")
    }
}

/// Period selection shared by the reporting commands.
#[derive(Debug, Clone, Args)]
pub struct PeriodArgs {
    /// Period around the reference date
    #[arg(short, long, value_enum)]
    pub period: Option<PeriodKind>,

    /// Reference date (YYYY-MM-DD or 'today')
    #[arg(long, default_value = "today")]
    pub reference: String,

    /// First day included (YYYY-MM-DD); implies a custom period
    #[arg(long)]
    pub from: Option<String>,

    /// Last day included (YYYY-MM-DD); implies a custom period
    #[arg(long)]
    pub to: Option<String>,
}

impl PeriodArgs {
    /// Resolves the selected period. Without `--period`, explicit bounds
    /// select a custom period and no bounds select `default`.
    pub fn resolve(&self, default: PeriodKind) -> Result<Period> {
        let kind = match self.period {
            Some(kind) => kind,
            None if self.from.is_some() || self.to.is_some() => PeriodKind::Custom,
            None => default,
        };
        let reference = parse_reference(&self.reference).map_err(|_| msg_error_anyhow!(Message::InvalidDate(self.reference.clone())))?;
        let from = period_bound("from", self.from.clone()).map_err(|_| msg_error_anyhow!(Message::InvalidDate(self.from.clone().unwrap_or_default())))?;
        let to = period_bound("to", self.to.clone()).map_err(|_| msg_error_anyhow!(Message::InvalidDate(self.to.clone().unwrap_or_default())))?;
        Ok(Period::resolve(kind, reference, from, to))
    }
}

/// The stored session with a client bound to its server, or `None` after
/// telling the user to log in.
pub(crate) fn current_session() -> Result<Option<(Session, ApiClient)>> {
    match SessionStore::new().read()? {
        Some(session) => {
            let client = ApiClient::new(&session.base_url).with_token(session.token.clone());
            Ok(Some((session, client)))
        }
        None => {
            msg_info!(Message::NotLoggedIn);
            Ok(None)
        }
    }
}
