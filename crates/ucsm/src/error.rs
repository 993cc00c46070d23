//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use ucsm_config::ConfigError;
use ucsm_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const NOT_IMPLEMENTED: i32 = 5;
    pub const COMMIT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    /// `EX_CONFIG` from sysexits.h.
    pub const CONFIG: i32 = 78;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to UCS Manager at {url}")]
    #[diagnostic(
        code(ucsm::connection_failed),
        help(
            "Check that the cluster address is reachable: {reason}\n\
             For self-signed certificates try: ucsm --insecure ..."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ucsm::auth_failed),
        help(
            "Verify the username and password.\n\
             Store a new password with: ucsm config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(ucsm::timeout),
        help("Increase timeout with --timeout or check UCS Manager responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Resolution ───────────────────────────────────────────────────

    #[error("VLAN group '{name}' not found")]
    #[diagnostic(
        code(ucsm::group_not_found),
        help("Available groups: {available}\nRun: ucsm show groups")
    )]
    GroupNotFound { name: String, available: String },

    #[error("No VLAN with id {vlan_id}")]
    #[diagnostic(code(ucsm::vlan_not_found), help("Run: ucsm show vlan {vlan_id}"))]
    VlanNotFound { vlan_id: u16 },

    // ── Commit ───────────────────────────────────────────────────────

    #[error("Commit of {staged} staged change(s) failed: {message}")]
    #[diagnostic(
        code(ucsm::commit_failed),
        help(
            "Some changes may have been applied before the failure.\n\
             Inspect the fabric with: ucsm show pooled"
        )
    )]
    CommitFailed { staged: usize, message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(ucsm::api_error))]
    ApiError { code: String, message: String },

    // ── Unsupported ──────────────────────────────────────────────────

    #[error("'{feature}' is not yet implemented")]
    #[diagnostic(code(ucsm::not_implemented))]
    NotYetImplemented { feature: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ucsm::validation))]
    Validation { field: String, reason: String },

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(ucsm::confirmation_required),
        help("Use --yes (-y) to commit in non-interactive contexts, or --dry-run to preview.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(ucsm::no_config),
        help("Create it with host, username and password keys, or drop --config.")
    )]
    ConfigNotFound { path: String },

    #[error("Missing required config key '{key}'")]
    #[diagnostic(
        code(ucsm::missing_key),
        help(
            "Set '{key}' in config.yaml or export {env_var}.\n\
             Passwords can also be stored with: ucsm config set-password"
        )
    )]
    MissingConfigKey { key: String, env_var: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(ucsm::config))]
    Config { message: String },

    #[error("Keyring error: {message}")]
    #[diagnostic(code(ucsm::keyring))]
    Keyring { message: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(ucsm::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::GroupNotFound { .. } | Self::VlanNotFound { .. } => exit_code::NOT_FOUND,
            Self::CommitFailed { .. } => exit_code::COMMIT,
            Self::NotYetImplemented { .. } => exit_code::NOT_IMPLEMENTED,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::ConfigNotFound { .. } | Self::MissingConfigKey { .. } | Self::Config { .. } => {
                exit_code::CONFIG
            }
            Self::ApiError { .. } | Self::Keyring { .. } | Self::Io(_) | Self::Render(_) => {
                exit_code::GENERAL
            }
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::NotConnected => CliError::ConnectionFailed {
                url: "(disconnected)".into(),
                reason: "the session is not logged in".into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::VlanGroupNotFound { name, available } => CliError::GroupNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },

            CoreError::VlanNotFound { vlan_id } => CliError::VlanNotFound { vlan_id },

            CoreError::CommitFailed { staged, message } => CliError::CommitFailed { staged, message },

            CoreError::Decode {
                class_id,
                dn,
                message,
            } => CliError::ApiError {
                code: "decode".into(),
                message: format!("{class_id} at {dn}: {message}"),
            },

            CoreError::Api { message, code } => CliError::ApiError {
                code: code.unwrap_or_default(),
                message,
            },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => CliError::ConfigNotFound {
                path: path.display().to_string(),
            },
            ConfigError::MissingKey { key } => CliError::MissingConfigKey {
                key: key.into(),
                env_var: format!("UCSM_{}", key.to_uppercase()),
            },
            ConfigError::Validation { field, reason } => CliError::Config {
                message: format!("invalid {field}: {reason}"),
            },
            ConfigError::Figment(e) => CliError::Config {
                message: e.to_string(),
            },
            ConfigError::Keyring(e) => CliError::Keyring {
                message: e.to_string(),
            },
        }
    }
}
