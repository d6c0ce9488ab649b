//! Display implementation for application messages.
//!
//! All user-facing text is defined here, in one match, so wording stays
//! consistent across commands and the server logs.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleServer => "REST server".to_string(),
            Message::ConfigModuleApi => "Remote API".to_string(),
            Message::ConfigModuleInvoice => "Invoicing".to_string(),
            Message::ConfigModuleProfile => "Local profile".to_string(),
            Message::ConfigFileInvalid(path) => format!("Configuration file {} could not be parsed", path),
            Message::ConfigDeleted => "Configuration removed".to_string(),

            // === WORK ENTRY MESSAGES ===
            Message::EntryCreated(id, hours) => format!("Work entry {} saved ({:.2} h)", id, hours),
            Message::EntryDeleted(id) => format!("Work entry {} deleted", id),
            Message::EntryNotFound(id) => format!("Work entry {} not found", id),
            Message::EntriesNotFound => "No work entries found".to_string(),
            Message::EntriesHeader(period) => format!("Work entries {}", period),
            Message::EntriesImported(imported, skipped) => format!("Imported {} work entries, skipped {}", imported, skipped),
            Message::EntrySkipped(index, reason) => format!("Record #{} skipped: {}", index, reason),
            Message::InvalidBreakRange(value) => format!("Invalid break '{}', expected HH:MM-HH:MM", value),

            // === CLIENT MESSAGES ===
            Message::ClientCreated(name) => format!("Client '{}' created", name),
            Message::ClientDeleted(id) => format!("Client {} deleted", id),
            Message::ClientNotFound(id) => format!("Client {} not found", id),
            Message::ClientsNotFound => "No clients or activities registered".to_string(),
            Message::ClientsHeader => "Clients and activities".to_string(),

            // === CATEGORY MESSAGES ===
            Message::CategoryAdded(name) => format!("Category '{}' added", name),
            Message::CategoryAlreadyExists(name) => format!("Category '{}' already exists", name),
            Message::CategoryRemoved(name) => format!("Category '{}' removed", name),
            Message::CategoryNotFound(name) => format!("Category '{}' not found", name),
            Message::CategoriesHeader => "Categories".to_string(),

            // === SUMMARY AND INVOICE MESSAGES ===
            Message::SummaryHeader(period) => format!("Summary {}", period),
            Message::ByCategoryHeader => "By category".to_string(),
            Message::ByDateHeader => "By date".to_string(),
            Message::NoEntriesInPeriod => "No work entries in this period".to_string(),
            Message::InvoiceHeader(period) => format!("Invoice preview {}", period),
            Message::ExportingInvoice(format) => format!("Exporting invoice as {}...", format),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),

            // === ACCOUNT MESSAGES ===
            Message::LoggedIn(email) => format!("Logged in as {}", email),
            Message::LoggedOut => "Logged out".to_string(),
            Message::NotLoggedIn => "Not logged in. Run 'heures login' first".to_string(),
            Message::CurrentUser(name, email) => format!("{} <{}>", name, email),
            Message::EmailAlreadyRegistered => "Email already registered".to_string(),
            Message::InvalidCredentials => "Invalid credentials".to_string(),
            Message::ApiRequestFailed(error) => format!("API request failed: {}", error),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("heures backend listening on http://{}", addr),
            Message::ServerStopped => "Server stopped".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select the modules to configure".to_string(),
            Message::PromptServerHost => "Server host".to_string(),
            Message::PromptServerPort => "Server port".to_string(),
            Message::PromptSessionTtl => "Session lifetime in hours".to_string(),
            Message::PromptApiBaseUrl => "Remote API base URL".to_string(),
            Message::PromptFallbackRate => "Fallback hourly rate".to_string(),
            Message::PromptUserId => "Local user id".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptRepeatPassword => "Repeat password".to_string(),
            Message::PasswordMismatch => "Passwords do not match".to_string(),
            Message::PromptConfirmDelete(what) => format!("Delete {}?", what),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
