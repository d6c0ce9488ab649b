use crate::libs::config::Config;
use crate::server;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind, overrides the configuration and HEURES_HOST
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overrides the configuration and HEURES_PORT
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    let config = Config::read()?;
    let mut server_config = config.server_or_default().with_env_overrides();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    server::run(&config, &server_config).await
}
