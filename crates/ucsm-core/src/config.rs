// ── Runtime connection configuration ──
//
// These types describe *how* to reach a UCS Manager instance.
// They carry credential data and connection tuning, but never touch disk.
// The CLI builds a `ControllerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default: fabric
    /// interconnects ship with self-signed certificates.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single UCS Manager.
///
/// Built by the CLI, passed to `Controller` -- core never reads config files.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Hostname, IP, or full URL of the UCS Manager cluster address.
    pub host: String,
    pub username: String,
    pub password: SecretString,
    /// Use HTTPS (default) or plain HTTP.
    pub secure: bool,
    /// Non-default port, if any.
    pub port: Option<u16>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ControllerConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password,
            secure: true,
            port: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
