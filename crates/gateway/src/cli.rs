//! Command-line interface for the `parley` binary.

use clap::{Parser, Subcommand};

use parley_domain::config::{Config, ConfigSeverity};

/// Parley — an AI-guided structured interview gateway.
#[derive(Debug, Parser)]
#[command(name = "parley", version, about)]
pub struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the gateway server (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any issues.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

/// Load the config file, falling back to defaults when it is absent.
///
/// A missing file is not an error: the gateway then runs in degraded mode
/// with mock sessions, which is the expected local-dev experience.
pub fn load_config(path: &str) -> anyhow::Result<Config> {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            let config: Config =
                toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {path}: {e}"))?;
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path, "no config file found — using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(anyhow::anyhow!("reading {path}: {e}")),
    }
}

/// Run validation and print the issues. Returns overall pass/fail
/// (warnings do not fail the check).
pub fn validate(config: &Config, path: &str) -> bool {
    let issues = config.validate();

    if issues.is_empty() {
        println!("{path}: OK");
        return true;
    }

    for issue in &issues {
        println!("{issue}");
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    println!("{path}: {} issue(s), {errors} error(s)", issues.len());
    errors == 0
}

/// Print the resolved configuration (with defaults applied) as TOML.
pub fn show(config: &Config) {
    match toml::to_string_pretty(config) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => eprintln!("failed to render config: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_missing_file_uses_defaults() {
        let config = load_config("definitely-not-here-parley.toml").unwrap();
        assert_eq!(config.server.port, 3410);
    }

    #[test]
    fn validate_passes_on_defaults() {
        // Defaults only produce warnings (no store configured).
        assert!(validate(&Config::default(), "defaults"));
    }

    #[test]
    fn validate_fails_on_zero_timeout() {
        let mut config = Config::default();
        config.collab.timeout_ms = 0;
        assert!(!validate(&config, "bad"));
    }
}
