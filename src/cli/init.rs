//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{ReconClient, ScanApi};
use crate::config::{Config, MAX_TIMEOUT_MINUTES, MIN_TIMEOUT_MINUTES, validate_timeout};
use crate::error::Result;

const FORMATS: [&str; 3] = ["pretty", "table", "json"];

/// Run the init command
///
/// Existing values are offered as defaults, so re-running init edits the
/// current configuration rather than starting over.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut config = Config::load_or_default(opts.config_ref())?;

    println!("{}", "Welcome to Reconboard!".bold().green());
    println!("Let's point you at your scan service.\n");

    let api_url: String = Input::with_theme(&theme)
        .with_prompt("Scan service URL")
        .default(config.api_url(opts.api_url_ref()))
        .validate_with(|url: &String| -> std::result::Result<(), &str> {
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://")
            }
        })
        .interact_text()?;

    // Check the service before saving
    println!("\n{}", "Checking scan service...".cyan());
    let client = ReconClient::with_base_url(api_url.clone())?;
    match client.health().await {
        Ok(_) => println!("{}", "✓ Scan service is reachable!".green()),
        Err(err) => {
            println!("{} {}", "⚠".yellow(), err);
            let keep = Confirm::with_theme(&theme)
                .with_prompt("Save this URL anyway?")
                .default(true)
                .interact()?;
            if !keep {
                println!("Nothing saved.");
                return Ok(());
            }
        }
    }
    config.api_url = Some(api_url);

    println!("\n{}", "New scan defaults".bold());
    config.preferences.default_timeout = Input::with_theme(&theme)
        .with_prompt(format!(
            "Timeout in minutes ({}-{})",
            MIN_TIMEOUT_MINUTES, MAX_TIMEOUT_MINUTES
        ))
        .default(config.preferences.default_timeout)
        .validate_with(validate_timeout)
        .interact_text()?;

    config.preferences.passive = Confirm::with_theme(&theme)
        .with_prompt("Passive scans by default?")
        .default(config.preferences.passive)
        .interact()?;

    let current = config
        .preferences
        .format
        .as_deref()
        .and_then(|f| FORMATS.iter().position(|name| *name == f))
        .unwrap_or(0);
    let selection = Select::with_theme(&theme)
        .with_prompt("Default output format")
        .items(&FORMATS)
        .default(current)
        .interact()?;
    config.preferences.format = Some(FORMATS[selection].to_string());

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "reconboard status".cyan());
    println!("  {} - List scans", "reconboard scan list".cyan());
    println!(
        "  {} - Start a scan",
        "reconboard scan create example.com".cyan()
    );

    Ok(())
}
