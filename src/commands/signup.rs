use crate::{
    api::{ApiClient, Session, SessionStore},
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Password};

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(short, long)]
    email: String,

    /// API base URL, overrides the configuration
    #[arg(long)]
    url: Option<String>,
}

/// Creates the account and keeps the returned session, as `login` does.
pub async fn cmd(args: SignupArgs) -> Result<()> {
    let base_url = match args.url {
        Some(url) => url,
        None => Config::read()?.api_or_default().base_url,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .with_confirmation(Message::PromptRepeatPassword.to_string(), Message::PasswordMismatch.to_string())
        .interact()?;

    let client = ApiClient::new(&base_url);
    let auth = client.signup(&args.first_name, &args.last_name, &args.email, &password).await?;

    SessionStore::new().write(&Session {
        base_url: client.base_url().to_string(),
        token: auth.token,
        user: auth.user.clone(),
    })?;
    msg_success!(Message::LoggedIn(auth.user.email));
    Ok(())
}
