//! Application configuration initialization command.
//!
//! Runs the interactive setup wizard and saves the result to `config.json`
//! in the data directory.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration instead of creating a new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        let path = Config::path()?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::info!(path = %path.display(), "configuration removed");
        }
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
