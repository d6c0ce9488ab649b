use super::current_session;
use crate::{api::SessionStore, libs::messages::Message, msg_success};
use anyhow::Result;

/// Revokes the session on the server and forgets it locally. The local copy
/// is removed even when the server cannot be reached.
pub async fn cmd() -> Result<()> {
    let Some((_, client)) = current_session()? else {
        return Ok(());
    };

    if let Err(e) = client.logout().await {
        tracing::warn!(error = %e, "server-side logout failed");
    }
    SessionStore::new().delete()?;

    msg_success!(Message::LoggedOut);
    Ok(())
}
