//! User-facing messages and the macros that print them.
//!
//! ```rust
//! use heures::libs::messages::Message;
//! use heures::msg_success;
//!
//! msg_success!(Message::ConfigSaved);
//! ```

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
