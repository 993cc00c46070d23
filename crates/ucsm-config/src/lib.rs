//! Configuration for the ucsm CLI.
//!
//! A flat YAML or TOML document, `UCSM_*` environment overrides, keyring
//! password lookup, and translation to `ucsm_core::ControllerConfig`.
//! Core never reads files; everything disk-related lives here.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml, Yaml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use ucsm_core::{ControllerConfig, TlsVerification};

/// Keyring service name; entries are keyed `{username}@{host}`.
pub const KEYRING_SERVICE: &str = "ucsm";

/// File name looked up in the working directory and the config dir.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

const ENV_PREFIX: &str = "UCSM_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("missing required config key '{key}'")]
    MissingKey { key: &'static str },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── File config ─────────────────────────────────────────────────────

/// The on-disk document, after environment overrides.
#[derive(Clone, Deserialize, Serialize)]
pub struct FileConfig {
    /// UCS Manager cluster address: hostname, IP, or full URL.
    pub host: Option<String>,

    pub username: Option<String>,

    /// Plaintext password (prefer the keyring). Never serialized back out.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// HTTPS (default) or plain HTTP.
    #[serde(default = "default_secure")]
    pub secure: bool,

    pub port: Option<u16>,

    /// Verify the controller certificate against the system store.
    #[serde(default)]
    pub verify_tls: bool,

    /// Custom CA certificate. Implies verification.
    pub ca_cert: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_secure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            host: None,
            username: None,
            password: None,
            secure: default_secure(),
            port: None,
            verify_tls: false,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

impl fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("secure", &self.secure)
            .field("port", &self.port)
            .field("verify_tls", &self.verify_tls)
            .field("ca_cert", &self.ca_cert)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Where the password for a config would come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSource {
    /// The file or `UCSM_PASSWORD`.
    Config,
    Keyring,
    Missing,
}

impl fmt::Display for PasswordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "config",
            Self::Keyring => "keyring",
            Self::Missing => "missing",
        })
    }
}

impl FileConfig {
    pub fn host(&self) -> Result<&str, ConfigError> {
        non_empty(self.host.as_deref(), "host")
    }

    pub fn username(&self) -> Result<&str, ConfigError> {
        non_empty(self.username.as_deref(), "username")
    }

    /// Password from the config, else the keyring.
    pub fn resolve_password(&self) -> Result<SecretString, ConfigError> {
        self.resolve_password_with(keyring_lookup)
    }

    /// Like [`resolve_password`](Self::resolve_password) with a custom
    /// fallback lookup, called as `lookup(host, username)`.
    pub fn resolve_password_with(
        &self,
        lookup: impl FnOnce(&str, &str) -> Option<String>,
    ) -> Result<SecretString, ConfigError> {
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            return Ok(SecretString::from(password.to_owned()));
        }
        let (host, username) = (self.host()?, self.username()?);
        lookup(host, username)
            .map(SecretString::from)
            .ok_or(ConfigError::MissingKey { key: "password" })
    }

    pub fn password_source(&self) -> PasswordSource {
        self.password_source_with(keyring_lookup)
    }

    pub fn password_source_with(
        &self,
        lookup: impl FnOnce(&str, &str) -> Option<String>,
    ) -> PasswordSource {
        match self.resolve_password_with(lookup) {
            Ok(_) if self.password.as_deref().is_some_and(|p| !p.is_empty()) => {
                PasswordSource::Config
            }
            Ok(_) => PasswordSource::Keyring,
            Err(_) => PasswordSource::Missing,
        }
    }

    pub fn tls(&self) -> TlsVerification {
        if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else if self.verify_tls {
            TlsVerification::SystemDefaults
        } else {
            // fabric interconnects ship self-signed
            TlsVerification::DangerAcceptInvalid
        }
    }

    /// Build a `ControllerConfig`, resolving the password via the keyring
    /// when the config holds none.
    pub fn into_controller_config(self) -> Result<ControllerConfig, ConfigError> {
        self.into_controller_config_with(keyring_lookup)
    }

    pub fn into_controller_config_with(
        self,
        lookup: impl FnOnce(&str, &str) -> Option<String>,
    ) -> Result<ControllerConfig, ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least one second".into(),
            });
        }
        let password = self.resolve_password_with(lookup)?;
        let mut config = ControllerConfig::new(self.host()?, self.username()?, password);
        config.secure = self.secure;
        config.port = self.port;
        config.tls = self.tls();
        config.timeout = Duration::from_secs(self.timeout);
        Ok(config)
    }
}

fn non_empty<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingKey { key })
}

// ── Config file path ────────────────────────────────────────────────

/// The platform config file path (XDG on Linux).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "ucsm", "ucsm").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push(CONFIG_FILE_NAME);
            p
        },
        |dirs| dirs.config_dir().join(CONFIG_FILE_NAME),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("ucsm");
    p
}

/// Pick the config file: an explicit path (which must exist), else
/// `./config.yaml` when present, else [`config_path`].
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok(path.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(local);
    }
    Ok(config_path())
}

// ── Config loading ──────────────────────────────────────────────────

/// Load `path` (YAML unless it ends in `.toml`) merged with `UCSM_*`
/// environment variables. A missing file yields env-only config.
pub fn load_from(path: &Path) -> Result<FileConfig, ConfigError> {
    let figment = match path.extension().and_then(OsStr::to_str) {
        Some("toml") => Figment::new().merge(Toml::file(path)),
        _ => Figment::new().merge(Yaml::file(path)),
    };
    let config: FileConfig = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
    debug!(path = %path.display(), host = ?config.host, "loaded configuration");
    Ok(config)
}

/// [`resolve_path`] followed by [`load_from`]. Returns the path used.
pub fn load(explicit: Option<&Path>) -> Result<(PathBuf, FileConfig), ConfigError> {
    let path = resolve_path(explicit)?;
    let config = load_from(&path)?;
    Ok((path, config))
}

// ── Keyring ─────────────────────────────────────────────────────────

fn keyring_user(host: &str, username: &str) -> String {
    format!("{username}@{host}")
}

fn keyring_lookup(host: &str, username: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(host, username)).ok()?;
    match entry.get_password() {
        Ok(password) => Some(password),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            debug!(error = %e, "keyring lookup failed");
            None
        }
    }
}

/// Store a password in the system keyring for `username@host`.
pub fn save_password(host: &str, username: &str, password: &SecretString) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(host, username))?;
    entry.set_password(password.expose_secret())?;
    debug!(host, username, "password stored in keyring");
    Ok(())
}
