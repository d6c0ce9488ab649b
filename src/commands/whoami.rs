use super::current_session;
use crate::{libs::messages::Message, msg_print};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let Some((_, client)) = current_session()? else {
        return Ok(());
    };

    let user = client.me().await?;
    msg_print!(Message::CurrentUser(user.full_name(), user.email));
    Ok(())
}
