//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Reconboard Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    let config = match Config::load_from(config_path.clone()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(Error::Config(ConfigError::NotFound)) => {
            println!("{} Configuration not found", "○".dimmed());
            println!(
                "  → Run {} to create one; using defaults",
                "reconboard init".cyan()
            );
            Config::default()
        }
        Err(err) => {
            println!("{} Configuration invalid: {}", "✗".red(), err);
            println!("  → Fix {} or re-run 'reconboard init'", config_path.display());
            println!();
            return Ok(());
        }
    };

    println!();

    // Scan service URL and where it came from
    let api_url = config.api_url(opts.api_url_ref());
    let source = if opts.api_url.is_some() {
        "(via --api-url / RECONBOARD_API_URL)"
    } else if config.api_url.is_some() {
        "(from config)"
    } else {
        "(default)"
    };
    println!("{} Scan service: {} {}", "✓".green(), api_url.cyan(), source.dimmed());

    // Form defaults
    let prefs = &config.preferences;
    println!(
        "{} New scans: {} minute timeout, {}",
        "✓".green(),
        prefs.default_timeout,
        if prefs.passive { "passive" } else { "active" }
    );

    match &prefs.format {
        Some(format) => println!("{} Default output format: {}", "✓".green(), format),
        None => println!("{} Default output format: pretty", "○".dimmed()),
    }

    println!();
    Ok(())
}
