//! Config subcommand handlers.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

/// What `config show` prints. The password itself never appears.
#[derive(Serialize)]
struct ConfigView {
    path: PathBuf,
    host: Option<String>,
    username: Option<String>,
    password: String,
    secure: bool,
    port: Option<u16>,
    verify_tls: bool,
    ca_cert: Option<PathBuf>,
    timeout: u64,
}

fn detail(view: &ConfigView) -> String {
    fn opt<T: std::fmt::Display>(value: Option<&T>) -> String {
        value.map_or_else(|| "-".into(), ToString::to_string)
    }
    [
        format!("path:       {}", view.path.display()),
        format!("host:       {}", opt(view.host.as_ref())),
        format!("username:   {}", opt(view.username.as_ref())),
        format!("password:   ({})", view.password),
        format!("secure:     {}", view.secure),
        format!("port:       {}", opt(view.port.as_ref())),
        format!("verify_tls: {}", view.verify_tls),
        format!(
            "ca_cert:    {}",
            view.ca_cert
                .as_ref()
                .map_or_else(|| "-".into(), |p| p.display().to_string())
        ),
        format!("timeout:    {}s", view.timeout),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = ucsm_config::resolve_path(global.config.as_deref())?;
            if !path.is_file() && !global.quiet {
                eprintln!("(file does not exist; only UCSM_* environment variables apply)");
            }
            output::print_output(&path.display().to_string(), false);
            Ok(())
        }

        ConfigCommand::Show => {
            let (path, file) = config::load(global)?;
            let view = ConfigView {
                password: file.password_source().to_string(),
                path,
                host: file.host,
                username: file.username,
                secure: file.secure,
                port: file.port,
                verify_tls: file.verify_tls,
                ca_cert: file.ca_cert,
                timeout: file.timeout,
            };
            let out = output::render_single(&global.output, &view, detail, |v| {
                v.path.display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let (_, file) = config::load(global)?;
            let host = file.host()?;
            let username = file.username()?;

            let secret = rpassword::prompt_password(format!("Password for {username}@{host}: "))
                .map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            ucsm_config::save_password(host, username, &SecretString::from(secret))?;
            if !global.quiet {
                eprintln!("✓ Password stored in system keyring for {username}@{host}");
            }
            Ok(())
        }
    }
}
