//! Clap derive structures for the `ddmctl` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ddmctl -- manage Declarative Device Management sets and status
#[derive(Debug, Parser)]
#[command(
    name = "ddmctl",
    version,
    about = "Manage Declarative Device Management sets and device status",
    long_about = "Command-line client for a DDM server.\n\n\
        Adds and removes devices from declaration sets and reports the\n\
        declaration status, status values, and status errors of a device.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "DDM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// DDM server base URL (overrides profile)
    #[arg(long, short = 'u', env = "DDM_URL", global = true)]
    pub url: Option<String>,

    /// API key used for Basic auth
    #[arg(
        long,
        alias = "api_key",
        env = "DDM_API_KEY",
        global = true,
        hide_env = true
    )]
    pub api_key: Option<String>,

    /// Device enrollment ID (UUID)
    #[arg(long, short = 'i', alias = "client_id", env = "DDM_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// Basic-auth username [default: kmfddm]
    #[arg(long, env = "DDM_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format for server responses [default: `[defaults] output`, else json]
    #[arg(long, short = 'o', env = "DDM_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: `[defaults] color`, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "DDM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (no timeout by default)
    #[arg(
        long,
        env = "DDM_TIMEOUT",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, tab-indented (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Device set membership and status
    #[command(alias = "dev", alias = "d")]
    Device(DeviceArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DeviceArgs {
    #[command(subcommand)]
    pub command: DeviceCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Get all sets for a given device
    Sets,

    /// Add a device to a declaration set
    Add {
        /// Set name
        set: String,
    },

    /// Remove a device from an enrollment set
    #[command(alias = "rm")]
    Remove {
        /// Set name
        set: String,
    },

    /// List declarations for a specified device ID
    Declarations,

    /// List values for a specified device ID
    Values,

    /// List errors for a specified device ID
    Errors,

    /// Query a status report by type (declarations, values, errors)
    Status {
        /// Status type
        category: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display the config file with secrets masked
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's API key in the system keyring
    SetKey,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
