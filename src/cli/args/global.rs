//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence is CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file values are applied in
/// `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format, `None` when neither flag nor env var was given
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.reconboard/config.yaml)
    pub config: Option<String>,

    /// Scan service base URL override
    pub api_url: Option<String>,
}

impl GlobalOptions {
    /// Build from the parsed CLI, once in main.rs.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }
}
