use crate::{
    api::{ApiClient, Session, SessionStore},
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email, prompted when omitted
    #[arg(short, long)]
    email: Option<String>,

    /// API base URL, overrides the configuration
    #[arg(long)]
    url: Option<String>,
}

pub async fn cmd(args: LoginArgs) -> Result<()> {
    let base_url = match args.url {
        Some(url) => url,
        None => Config::read()?.api_or_default().base_url,
    };
    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&ColorfulTheme::default()).with_prompt(Message::PromptEmail.to_string()).interact_text()?,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;

    let client = ApiClient::new(&base_url);
    let auth = client.login(&email, &password).await?;

    SessionStore::new().write(&Session {
        base_url: client.base_url().to_string(),
        token: auth.token,
        user: auth.user.clone(),
    })?;
    msg_success!(Message::LoggedIn(auth.user.email));
    Ok(())
}
