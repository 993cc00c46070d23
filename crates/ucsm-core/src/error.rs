// ── Core error types ──
//
// User-facing errors from ucsm-core. Consumers never see HTTP or XML
// failures directly; the `From<ucsm_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Coarse error category, used by callers to pick an exit status and to
/// tell "nothing happened" apart from "the fabric may have changed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing configuration. Raised before any connection.
    Configuration,
    /// Login, transport, or session failure. Nothing was staged remotely.
    Connection,
    /// A named VLAN or VLAN group does not exist. Raised before staging.
    Resolution,
    /// The commit call failed; some changes may have been applied.
    RemoteMutation,
    /// Anything else (decode failures, unexpected API errors).
    Other,
}

impl ErrorKind {
    /// `true` only when the controller may hold partially applied changes.
    pub fn may_have_mutated(self) -> bool {
        matches!(self, Self::RemoteMutation)
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to UCS Manager at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("UCS Manager request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Controller is not connected")]
    NotConnected,

    // ── Resolution errors ────────────────────────────────────────────
    #[error("VLAN group not found: {name}")]
    VlanGroupNotFound {
        name: String,
        /// Names of the groups that do exist, for diagnostics.
        available: Vec<String>,
    },

    #[error("No VLAN with id {vlan_id} exists")]
    VlanNotFound { vlan_id: u16 },

    // ── Remote mutation errors ───────────────────────────────────────
    #[error("Commit of {staged} staged change(s) failed: {message}")]
    CommitFailed { staged: usize, message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Cannot decode {class_id} at {dn}: {message}")]
    Decode {
        class_id: String,
        dn: String,
        message: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// The controller's `errorCode`, if one was reported.
        code: Option<String>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } => ErrorKind::Configuration,
            Self::ConnectionFailed { .. }
            | Self::AuthenticationFailed { .. }
            | Self::Timeout { .. }
            | Self::NotConnected => ErrorKind::Connection,
            Self::VlanGroupNotFound { .. } | Self::VlanNotFound { .. } => ErrorKind::Resolution,
            Self::CommitFailed { .. } => ErrorKind::RemoteMutation,
            Self::Decode { .. } | Self::Api { .. } | Self::Internal(_) => ErrorKind::Other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ucsm_api::Error> for CoreError {
    fn from(err: ucsm_api::Error) -> Self {
        match err {
            ucsm_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            ucsm_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            ucsm_api::Error::NotLoggedIn => CoreError::NotConnected,
            ucsm_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: e.status().map(|s| s.as_u16().to_string()),
                    }
                }
            }
            ucsm_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid host: {e}"),
            },
            ucsm_api::Error::Http {
                status,
                url,
                message,
            } => CoreError::ConnectionFailed {
                url,
                reason: format!("HTTP {status}: {message}"),
            },
            ucsm_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            ucsm_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ucsm_api::Error::Api { code, message } => CoreError::Api {
                message,
                code: Some(code),
            },
            ucsm_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
