//! CLI-side configuration: applies global flag overrides on top of the
//! file + environment config loaded by `ucsm_config`.
//!
//! Core never sees these types -- it receives a pre-built `ControllerConfig`.

use std::path::PathBuf;
use std::time::Duration;

use ucsm_config::FileConfig;
use ucsm_core::{ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config selected by `--config` (or the default lookup).
pub fn load(global: &GlobalOpts) -> Result<(PathBuf, FileConfig), CliError> {
    Ok(ucsm_config::load(global.config.as_deref())?)
}

/// Build a `ControllerConfig` from the config file, env, and CLI overrides.
pub fn build_controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let (path, file) = load(global)?;
    tracing::debug!(path = %path.display(), "using configuration");
    let mut config = file.into_controller_config()?;
    apply_overrides(&mut config, global)?;
    Ok(config)
}

fn apply_overrides(config: &mut ControllerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(seconds) = global.timeout {
        if seconds == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least one second".into(),
            });
        }
        config.timeout = Duration::from_secs(seconds);
    }
    Ok(())
}
