//! Application configuration.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! application data directory (see [`DataStorage`]). Every section is
//! optional: a missing file or a missing section falls back to defaults, so
//! the application runs without any setup.
//!
//! ## Sections
//!
//! - **server**: bind address and session lifetime of the REST backend
//! - **api**: base URL used by the remote commands (`login`, `remote-invoice`)
//! - **invoice**: fallback hourly rate when neither entry nor client has one
//! - **profile**: owner id stamped on locally created records
//! - **database**: optional explicit database file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use heures::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("serving on {}", config.server_or_default().addr());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment overrides applied on top of the server section.
pub const HOST_ENV: &str = "HEURES_HOST";
pub const PORT_ENV: &str = "HEURES_PORT";

/// Sessions last 7 days unless configured otherwise.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// REST backend settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Lifetime of a login session, in hours.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: i64,
}

/// Remote API used by the client-side commands.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InvoiceConfig {
    /// Rate applied when neither the entry, its activity nor its client has one.
    pub fallback_rate: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileConfig {
    pub user_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<InvoiceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,
}

fn default_session_ttl() -> i64 {
    DEFAULT_SESSION_TTL_HOURS
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 4000,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Applies `HEURES_HOST` / `HEURES_PORT` when set. An unparsable port
    /// is ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = env::var(HOST_ENV) {
            if !host.trim().is_empty() {
                self.host = host.trim().to_string();
            }
        }
        if let Some(port) = env::var(PORT_ENV).ok().and_then(|p| p.trim().parse().ok()) {
            self.port = port;
        }
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:4000".to_string(),
        }
    }
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        InvoiceConfig { fallback_rate: 0.0 }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig { user_id: "local".to_string() }
    }
}

impl Config {
    /// Location of the configuration file in the data directory.
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Reads the configuration from the data directory, or defaults when no
    /// file exists yet.
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        serde_json::from_str(&config_str).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "invalid configuration file");
            msg_error_anyhow!(Message::ConfigFileInvalid(path.display().to_string()))
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn server_or_default(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn api_or_default(&self) -> ApiConfig {
        self.api.clone().unwrap_or_default()
    }

    pub fn fallback_rate(&self) -> f64 {
        self.invoice.as_ref().map(|i| i.fallback_rate).unwrap_or(0.0)
    }

    pub fn user_id(&self) -> String {
        self.profile.clone().unwrap_or_default().user_id
    }

    /// Database file: the configured path, or `heures.db` in the data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        match self.database.as_ref().and_then(|d| d.path.clone()) {
            Some(path) => Ok(path),
            None => DataStorage::new().get_path(crate::db::db::DB_FILE_NAME),
        }
    }

    /// Interactive setup wizard. Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "server".to_string(),
                name: Message::ConfigModuleServer.to_string(),
            },
            ConfigModule {
                key: "api".to_string(),
                name: Message::ConfigModuleApi.to_string(),
            },
            ConfigModule {
                key: "invoice".to_string(),
                name: Message::ConfigModuleInvoice.to_string(),
            },
            ConfigModule {
                key: "profile".to_string(),
                name: Message::ConfigModuleProfile.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => {
                    let default = config.server_or_default();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        host: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerHost.to_string())
                            .default(default.host)
                            .interact_text()?,
                        port: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerPort.to_string())
                            .default(default.port)
                            .interact_text()?,
                        session_ttl_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptSessionTtl.to_string())
                            .default(default.session_ttl_hours)
                            .interact_text()?,
                    });
                }
                "api" => {
                    let default = config.api_or_default();
                    msg_print!(Message::ConfigModuleApi);
                    config.api = Some(ApiConfig {
                        base_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptApiBaseUrl.to_string())
                            .default(default.base_url)
                            .interact_text()?,
                    });
                }
                "invoice" => {
                    msg_print!(Message::ConfigModuleInvoice);
                    config.invoice = Some(InvoiceConfig {
                        fallback_rate: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptFallbackRate.to_string())
                            .default(config.fallback_rate())
                            .interact_text()?,
                    });
                }
                "profile" => {
                    msg_print!(Message::ConfigModuleProfile);
                    config.profile = Some(ProfileConfig {
                        user_id: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptUserId.to_string())
                            .default(config.user_id())
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
