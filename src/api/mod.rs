//! Client side of the REST backend.
//!
//! Used by the remote commands (`login`, `logout`, `whoami`,
//! `remote-invoice`) to talk to a running `heures serve`, possibly on
//! another machine.
//!
//! ## Features
//!
//! - **ApiClient**: typed wrappers over every endpoint, bearer token attached
//! - **SessionStore**: the token of the last login, cached in the data directory
//!
//! ## Usage
//!
//! ```rust,no_run
//! use heures::api::{ApiClient, SessionStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let session = SessionStore::new().read()?;
//! let client = ApiClient::new("http://localhost:4000").with_session(session);
//! let me = client.me().await?;
//! println!("{}", me.full_name());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod session;

pub use client::ApiClient;
pub use session::{Session, SessionStore};
