//! Health command implementation

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::ScanApi;
use crate::error::Result;
use crate::output::json::format_json;
use crate::output::progress::spinner;

/// Call the scan service health endpoint and print its payload
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    debug!("Checking health of {}", ctx.client.base_url());

    let pb = spinner("Contacting scan service...");
    let payload = ctx.client.health().await;
    pb.finish_and_clear();
    let payload = payload?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&payload)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!(
                "{} Scan service reachable at {}",
                "✓".green(),
                ctx.client.base_url().cyan()
            );
            match payload {
                serde_json::Value::String(text) => println!("{}", text),
                other => println!("{}", serde_json::to_string_pretty(&other)?),
            }
        }
    }

    Ok(())
}
