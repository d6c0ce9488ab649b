//! Printing macros for [`Message`](super::Message) values.
//!
//! In normal mode messages go straight to the terminal (`println!` /
//! `eprintln!`). When `HEURES_DEBUG` or `RUST_LOG` is set they are routed
//! through `tracing` instead, so they interleave with the structured logs.
//!
//! - `msg_print!`, `msg_success!`, `msg_info!`, `msg_warning!`: stdout
//! - `msg_error!`: stderr
//! - `msg_debug!`: only emitted in debug mode
//! - `msg_error_anyhow!`, `msg_bail_anyhow!`: build or return an `anyhow::Error`
//!
//! Every display macro accepts an optional `true` second argument that pads
//! the message with blank lines.

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether messages should be routed to `tracing`. Checked once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("HEURES_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($level:ident, $out:ident, $fmt:literal, $msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!($fmt, $msg);
        } else {
            $out!($fmt, $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "{}", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "\n{}\n", $msg)
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "✅ {}", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "\n✅ {}\n", $msg)
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, "❌ {}", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(error, eprintln, "\n❌ {}\n", $msg)
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::__msg_emit!(warn, println, "⚠️ {}", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(warn, println, "\n⚠️ {}\n", $msg)
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "ℹ️ {}", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "\nℹ️ {}\n", $msg)
    };
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
