use thiserror::Error;

/// Top-level error type for the `ucsm-api` crate.
///
/// Covers every failure mode of the XML API surface: authentication,
/// transport, controller-reported method errors, and payload decoding.
/// `ucsm-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// `aaaLogin` was rejected (wrong credentials, locked account, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The session cookie is no longer accepted by the controller.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    /// A method was invoked before `aaaLogin` succeeded.
    #[error("Not logged in -- call login() first")]
    NotLoggedIn,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── XML API ─────────────────────────────────────────────────────
    /// Method failure reported in the response root (`errorCode`, `errorDescr`).
    #[error("UCS Manager error {code}: {message}")]
    Api { code: String, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// XML decoding failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

/// `errorCode` values that mean the session cookie was rejected.
const SESSION_ERROR_CODES: &[&str] = &["552", "572"];

impl Error {
    /// Classify a controller-reported method error.
    pub(crate) fn from_api(code: &str, message: &str) -> Self {
        if SESSION_ERROR_CODES.contains(&code) {
            Self::SessionExpired
        } else {
            Self::Api {
                code: code.to_owned(),
                message: message.to_owned(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_codes_map_to_expired() {
        assert!(matches!(
            Error::from_api("552", "Authorization required"),
            Error::SessionExpired
        ));
        let err = Error::from_api("103", "Cannot create; object already exists.");
        assert!(matches!(err, Error::Api { ref code, .. } if code == "103"));
    }
}
