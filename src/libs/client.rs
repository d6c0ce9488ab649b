use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const CLIENT_ID_PREFIX: &str = "c_";

/// Whether a registry record is a billed client or an internal activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    #[default]
    Client,
    Activity,
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientKind::Client => write!(f, "client"),
            ClientKind::Activity => write!(f, "activity"),
        }
    }
}

impl FromStr for ClientKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(ClientKind::Client),
            "activity" => Ok(ClientKind::Activity),
            other => Err(format!("unknown client kind: {}", other)),
        }
    }
}

/// Client or activity a work entry can be billed against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: ClientKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ClientRecord {
    pub fn new(user_id: &str, name: &str, kind: ClientKind, default_rate: Option<f64>) -> Self {
        Self {
            id: format!("{}{}", CLIENT_ID_PREFIX, Uuid::new_v4().simple()),
            user_id: user_id.to_string(),
            name: name.to_string(),
            kind,
            default_rate,
            ..Default::default()
        }
    }
}
