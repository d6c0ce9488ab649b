use crate::{
    db::{categories::Categories, db::Db},
    libs::{config::Config, messages::Message, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: Option<CategoryCommand>,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// List default and custom categories
    List,
    /// Add a custom category
    Add { name: String },
    /// Remove a custom category
    Remove { name: String },
}

pub fn cmd(args: CategoryArgs) -> Result<()> {
    let config = Config::read()?;
    let db = Db::from_config(&config)?;
    let categories = Categories::new(&db.conn);
    let user_id = config.user_id();

    match args.command.unwrap_or(CategoryCommand::List) {
        CategoryCommand::List => {
            msg_print!(Message::CategoriesHeader, true);
            View::categories(&categories.list(&user_id)?)?;
        }
        CategoryCommand::Add { name } => {
            if categories.add(&user_id, &name)? {
                msg_success!(Message::CategoryAdded(name.trim().to_string()));
            } else {
                msg_info!(Message::CategoryAlreadyExists(name.trim().to_string()));
            }
        }
        CategoryCommand::Remove { name } => {
            if categories.remove(&user_id, &name)? {
                msg_success!(Message::CategoryRemoved(name));
            } else {
                msg_error!(Message::CategoryNotFound(name));
            }
        }
    }

    Ok(())
}
