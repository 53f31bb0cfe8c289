//! CLI configuration -- thin wrapper around `ddmctl_config`.
//!
//! Re-exports the shared types and layers `GlobalOpts` flag overrides
//! (--url, --api-key, --client-id, ...) on top of the active profile.

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use ddmctl_api::{ClientConfig, TlsMode};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ddmctl_config::{
    Config, Defaults, Profile, config_path, load_config, save_config, store_api_key,
};

/// Everything a device command needs: how to reach the server, which
/// enrollment it targets, and how to render the result.
#[derive(Debug)]
pub struct Invocation {
    pub client: ClientConfig,
    pub client_id: String,
    pub output: OutputFormat,
    pub color: ColorMode,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Merge config file, profile, and CLI flags into an `Invocation`.
///
/// Checks run before any client is built: client ID shape, then base URL,
/// then API key.
pub fn resolve_invocation(global: &GlobalOpts) -> Result<Invocation, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => Profile::default(),
    };

    // 1. Enrollment ID (flag > env > profile)
    let client_id = global
        .client_id
        .clone()
        .or_else(|| profile.client_id.clone())
        .unwrap_or_default();
    ddmctl_config::validate_client_id(&client_id)?;

    // 2. Base URL (flag > env > profile)
    let base_url = global.url.clone().unwrap_or_else(|| profile.url.clone());
    if base_url.trim().is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }

    // 3. API key (flag > env > profile chain)
    let api_key = resolve_api_key_with_flag(&profile, &profile_name, global)?;

    // 4. Username
    let username = global
        .username
        .clone()
        .unwrap_or_else(|| profile.username().to_owned());

    // 5. Transport
    let mut transport = ddmctl_config::transport_for(&profile, &cfg.defaults);
    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        transport.timeout = Some(Duration::from_secs(secs));
    }

    Ok(Invocation {
        client: ClientConfig {
            base_url,
            username,
            api_key,
            transport,
        },
        client_id,
        output: output_format(global, &cfg.defaults)?,
        color: color_mode(global, &cfg.defaults)?,
    })
}

/// Output format: `--output`, then `[defaults] output`.
pub fn output_format(
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<OutputFormat, CliError> {
    global
        .output
        .map_or_else(|| parse_setting("output", &defaults.output), Ok)
}

/// Color mode: `--color`, then `[defaults] color`.
pub fn color_mode(global: &GlobalOpts, defaults: &Defaults) -> Result<ColorMode, CliError> {
    global
        .color
        .map_or_else(|| parse_setting("color", &defaults.color), Ok)
}

/// Parse a `[defaults]` entry with the same spelling the flag accepts.
fn parse_setting<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: format!("defaults.{field}"),
        reason,
    })
}

/// Resolve API key with CLI flag override, then fall through to shared resolution.
fn resolve_api_key_with_flag(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = global.api_key {
        if !key.is_empty() {
            return Ok(SecretString::from(key.clone()));
        }
    }
    Ok(ddmctl_config::resolve_api_key(profile, profile_name)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global_from(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["ddmctl"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["device", "sets"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn defaults(output: &str, color: &str) -> Defaults {
        Defaults {
            output: output.into(),
            color: color.into(),
            ..Defaults::default()
        }
    }

    #[test]
    fn config_defaults_apply_without_flags() {
        let global = global_from(&[]);
        let defaults = defaults("yaml", "never");

        assert!(matches!(
            output_format(&global, &defaults).unwrap(),
            OutputFormat::Yaml
        ));
        assert!(matches!(
            color_mode(&global, &defaults).unwrap(),
            ColorMode::Never
        ));
    }

    #[test]
    fn flags_override_config_defaults() {
        let global = global_from(&["--output", "json-compact", "--color", "always"]);
        let defaults = defaults("yaml", "never");

        assert!(matches!(
            output_format(&global, &defaults).unwrap(),
            OutputFormat::JsonCompact
        ));
        assert!(matches!(
            color_mode(&global, &defaults).unwrap(),
            ColorMode::Always
        ));
    }

    #[test]
    fn builtin_defaults_are_json_and_auto() {
        let global = global_from(&[]);

        assert!(matches!(
            output_format(&global, &Defaults::default()).unwrap(),
            OutputFormat::Json
        ));
        assert!(matches!(
            color_mode(&global, &Defaults::default()).unwrap(),
            ColorMode::Auto
        ));
    }

    #[test]
    fn unknown_default_output_is_a_validation_error() {
        let err = output_format(&global_from(&[]), &defaults("xml", "auto")).unwrap_err();
        assert!(
            matches!(err, CliError::Validation { ref field, .. } if field == "defaults.output")
        );
    }

    #[test]
    fn zero_timeout_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["ddmctl", "--timeout", "0", "device", "sets"]);
        assert!(result.is_err());
        assert_eq!(global_from(&["--timeout", "5"]).timeout, Some(5));
    }
}
