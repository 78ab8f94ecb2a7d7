//! Scan management commands

use colored::Colorize;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, Section};
use crate::client::{Domain, ReconClient, Scan, ScanId, ScanStatus};
use crate::config::{MAX_TIMEOUT_MINUTES, MIN_TIMEOUT_MINUTES, validate_timeout};
use crate::error::{ApiError, Error, Result};
use crate::models::{ScanCard, ScanDetail, ScanDisplay};
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::output::progress::spinner;
use crate::output::table::format_fields;
use crate::reorder::ReorderController;
use crate::store::ScanStore;

/// List all scans in display order
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let store = ctx.mount_store().await;

    if let Some(err) = store.last_error() {
        eprintln!("{} {}", "⚠".yellow(), err);
    }

    debug!("Showing {} scans", store.len());
    print_scans(store.entities(), ctx.format)
}

/// Show one scan, optionally narrowed to a results section
pub async fn get(opts: &GlobalOptions, scan_id: ScanId, section: Option<Section>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let store = ScanStore::new(ctx.client.clone());

    let pb = spinner("Fetching scan...");
    let scan = store.get(scan_id).await;
    pb.finish_and_clear();
    let scan = scan?;

    let detail = ScanDetail::new(&scan).section(section);
    match ctx.format {
        OutputFormat::Pretty => {
            print!("{}", detail);
            if section.is_none() && !scan.status.is_finished() {
                eprintln!();
                eprintln!(
                    "Scan is {}; run `reconboard scan get {}` again for results",
                    scan.status.as_str().to_lowercase(),
                    scan.id
                );
            }
        }
        OutputFormat::Table => println!("{}", format_fields(&detail.fields())),
        OutputFormat::Json => println!("{}", format_json(&scan)?),
    }

    Ok(())
}

/// Start a scan, from arguments or through the interactive form
pub async fn create(
    opts: &GlobalOptions,
    domain: Option<String>,
    timeout: Option<u32>,
    active: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut store = ScanStore::new(ctx.client.clone());

    let timeout = timeout.unwrap_or(ctx.config.preferences.default_timeout);
    let passive = !active && ctx.config.preferences.passive;

    let scan = match domain {
        Some(domain) => submit(&mut store, &domain, timeout, passive).await?,
        None => interactive_create(&mut store, timeout, passive).await?,
    };

    print_created(&scan, ctx.format)
}

async fn submit(
    store: &mut ScanStore<ReconClient>,
    domain: &str,
    timeout: u32,
    passive: bool,
) -> Result<Scan> {
    // Rejected locally before any spinner or request
    let domain = Domain::parse(domain)?;

    let pb = spinner(&format!("Starting scan of {}...", domain));
    let result = store
        .submit(domain.as_str(), Some(timeout), Some(passive))
        .await;
    pb.finish_and_clear();
    result
}

/// New-scan form. Entered values survive a failed submission so the user can
/// retry without retyping them.
async fn interactive_create(
    store: &mut ScanStore<ReconClient>,
    mut timeout: u32,
    mut passive: bool,
) -> Result<Scan> {
    let theme = ColorfulTheme::default();
    let mut domain = String::new();

    println!("{}", "New Scan".bold());
    loop {
        domain = Input::with_theme(&theme)
            .with_prompt("Domain (e.g. example.com)")
            .with_initial_text(domain.clone())
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                Domain::parse(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;

        timeout = Input::with_theme(&theme)
            .with_prompt(format!(
                "Timeout in minutes ({}-{})",
                MIN_TIMEOUT_MINUTES, MAX_TIMEOUT_MINUTES
            ))
            .default(timeout)
            .validate_with(validate_timeout)
            .interact_text()?;

        passive = Confirm::with_theme(&theme)
            .with_prompt("Passive scan only?")
            .default(passive)
            .interact()?;

        match submit(store, &domain, timeout, passive).await {
            Ok(scan) => return Ok(scan),
            Err(err) => {
                eprintln!("{} {}", "✗".red(), err);
                let retry = Confirm::with_theme(&theme)
                    .with_prompt("Edit and try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    return Err(err);
                }
            }
        }
    }
}

fn print_created(scan: &Scan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => {
            println!("{} Scan started", "✓".green());
            println!("{}", ScanCard(scan));
            eprintln!();
            eprintln!("Track it: reconboard scan get {}", scan.id);
        }
        OutputFormat::Table => vec![ScanDisplay::from(scan)].print(format)?,
        OutputFormat::Json => println!("{}", format_json(scan)?),
    }
    Ok(())
}

/// Drag `source_id` onto `target_id` and show the resulting order
pub async fn move_scan(opts: &GlobalOptions, source_id: ScanId, target_id: ScanId) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut store = ctx.mount_store().await;

    let source = require_loaded(&store, source_id)?;
    let mut controller = ReorderController::new();
    controller.drag_start(&source);

    let target = match require_loaded(&store, target_id) {
        Ok(target) => target,
        Err(err) => {
            controller.cancel();
            return Err(err);
        }
    };
    if let Some(preview) = controller.drag_over(&target) {
        debug!(
            "Dropping scan {} here would request order {}",
            preview.scan_id, preview.new_order
        );
    }

    let pb = spinner("Reordering...");
    let applied = controller.drop_onto(&target, &mut store).await;
    pb.finish_and_clear();

    match applied? {
        Some(intent) if ctx.format == OutputFormat::Pretty => {
            println!(
                "{} Moved {} to position {}\n",
                "✓".green(),
                source.domain.bold(),
                intent.new_order
            );
        }
        Some(_) => {}
        None => eprintln!("A scan cannot be dropped onto itself; order unchanged."),
    }

    if let Some(err) = store.last_error() {
        eprintln!("{} {}", "⚠".yellow(), err);
    }
    print_scans(store.entities(), ctx.format)
}

/// Set a scan's display order directly and show the resulting order
pub async fn reorder(opts: &GlobalOptions, scan_id: ScanId, new_order: i64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut store = ScanStore::new(ctx.client.clone());

    let pb = spinner("Reordering...");
    let result = store.reorder(scan_id, new_order).await;
    pb.finish_and_clear();
    result?;

    if let Some(err) = store.last_error() {
        eprintln!("{} {}", "⚠".yellow(), err);
    }
    print_scans(store.entities(), ctx.format)
}

/// Look up a scan among the loaded entities.
///
/// When the initial load failed, that failure is reported instead of a
/// misleading "not found".
fn require_loaded(store: &ScanStore<ReconClient>, id: ScanId) -> Result<Scan> {
    if let Some(scan) = store.find(id) {
        return Ok(scan.clone());
    }
    match store.last_error() {
        Some(err) if store.is_empty() => Err(Error::Other(err.to_string())),
        _ => Err(ApiError::NotFound(id.to_string()).into()),
    }
}

/// Print the collection: cards, table rows, or the raw scans as JSON
fn print_scans(scans: &[Scan], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => {
            if scans.is_empty() {
                println!("No scans yet. Start one with `reconboard scan create <domain>`.");
                return Ok(());
            }
            let cards: Vec<String> = scans.iter().map(|s| ScanCard(s).to_string()).collect();
            println!("{}", cards.join("\n\n"));
            println!("\n{}", summary_line(scans).dimmed());
        }
        OutputFormat::Table => {
            let rows: Vec<ScanDisplay> = scans.iter().map(ScanDisplay::from).collect();
            rows.print(format)?;
        }
        OutputFormat::Json => println!("{}", format_json(scans)?),
    }
    Ok(())
}

/// e.g. `3 scans: 1 completed, 1 running, 1 pending`
fn summary_line(scans: &[Scan]) -> String {
    let count = |status: ScanStatus| scans.iter().filter(|s| s.status == status).count();

    let parts: Vec<String> = [
        (ScanStatus::Completed, "completed"),
        (ScanStatus::Running, "running"),
        (ScanStatus::Pending, "pending"),
        (ScanStatus::Failed, "failed"),
    ]
    .into_iter()
    .filter_map(|(status, label)| match count(status) {
        0 => None,
        n => Some(format!("{} {}", n, label)),
    })
    .collect();

    let noun = if scans.len() == 1 { "scan" } else { "scans" };
    format!("{} {}: {}", scans.len(), noun, parts.join(", "))
}
