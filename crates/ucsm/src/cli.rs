//! Clap derive structures for the `ucsm` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ucsm -- move VLANs between VLAN groups on Cisco UCS Manager
#[derive(Debug, Parser)]
#[command(
    name = "ucsm",
    version,
    about = "Move VLANs between VLAN groups on Cisco UCS Manager",
    long_about = "Stage VLAN group migrations against a UCS Manager cluster and\n\
        apply them in a single transaction after confirmation.\n\n\
        Nothing is changed on the fabric until the commit is approved.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (YAML or TOML)
    #[arg(long, short = 'c', env = "UCSM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "UCSM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Commit without asking for confirmation
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move a VLAN between VLAN groups
    Vlan(VlanArgs),

    /// Read-only views of VLANs and VLAN groups
    Show(ShowArgs),

    /// System operations (reserved)
    #[command(alias = "sys")]
    System,

    /// Manage CLI configuration and stored credentials
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── vlan ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VlanArgs {
    /// VLAN id to move (every VLAN carrying this id is moved)
    #[arg(value_parser = clap::value_parser!(u16).range(1..=4094))]
    pub vlan_id: u16,

    /// Group to remove the VLAN from. Without it, the VLAN is detached
    /// from every port channel instead.
    #[arg(long, short = 's')]
    pub source: Option<String>,

    /// Group to add the VLAN to. Without it, the VLAN is left unbound.
    #[arg(long, short = 't')]
    pub target: Option<String>,

    /// Stage and print the pending changes, then exit without committing
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

// ── show ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(subcommand)]
    pub command: ShowCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShowCommand {
    /// VLANs carrying an id, across fabric scopes
    Vlan {
        #[arg(value_parser = clap::value_parser!(u16).range(1..=4094))]
        vlan_id: u16,
    },

    /// VLAN groups
    Groups,

    /// Pooled VLAN bindings, optionally for one group
    Pooled {
        /// Only bindings under this group
        #[arg(long, short = 'g')]
        group: Option<String>,
    },
}

// ── config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path that would be used
    Path,

    /// Display the resolved configuration (password redacted)
    Show,

    /// Store the controller password in the system keyring
    SetPassword,
}

// ── completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
