/// Every user-facing message of the application.
///
/// Text lives in the `Display` impl (see `display.rs`); call sites only
/// pick a variant and its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleServer,
    ConfigModuleApi,
    ConfigModuleInvoice,
    ConfigModuleProfile,
    ConfigFileInvalid(String), // path
    ConfigDeleted,

    // === WORK ENTRY MESSAGES ===
    EntryCreated(String, f64), // id, hours
    EntryDeleted(String),      // id
    EntryNotFound(String),     // id
    EntriesNotFound,
    EntriesHeader(String), // period label
    EntriesImported(usize, usize), // imported, skipped
    EntrySkipped(usize, String),   // index, reason
    InvalidBreakRange(String),     // raw value

    // === CLIENT MESSAGES ===
    ClientCreated(String), // name
    ClientDeleted(String), // id
    ClientNotFound(String),
    ClientsNotFound,
    ClientsHeader,

    // === CATEGORY MESSAGES ===
    CategoryAdded(String),
    CategoryAlreadyExists(String),
    CategoryRemoved(String),
    CategoryNotFound(String),
    CategoriesHeader,

    // === SUMMARY AND INVOICE MESSAGES ===
    SummaryHeader(String), // period label
    ByCategoryHeader,
    ByDateHeader,
    NoEntriesInPeriod,
    InvoiceHeader(String), // period label
    ExportingInvoice(String),
    ExportCompleted(String), // path

    // === ACCOUNT MESSAGES ===
    LoggedIn(String), // email
    LoggedOut,
    NotLoggedIn,
    CurrentUser(String, String), // name, email
    EmailAlreadyRegistered,
    InvalidCredentials,
    ApiRequestFailed(String), // error

    // === SERVER MESSAGES ===
    ServerListening(String), // address
    ServerStopped,

    // === PROMPTS ===
    PromptSelectModules,
    PromptServerHost,
    PromptServerPort,
    PromptSessionTtl,
    PromptApiBaseUrl,
    PromptFallbackRate,
    PromptUserId,
    PromptEmail,
    PromptPassword,
    PromptRepeatPassword,
    PasswordMismatch,
    PromptConfirmDelete(String),

    // === GENERAL MESSAGES ===
    OperationCancelled,
    InvalidDate(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    DatabaseUpToDate,
}
