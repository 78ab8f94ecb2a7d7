//! Dynamic shell completions for Reconboard
//!
//! Provides TAB completion for scan IDs by querying the scan service at
//! completion time.
//!
//! Shell support:
//! - Fish/Zsh: Full support with descriptions
//! - Bash: Values only (no description display)

use std::time::Duration;

use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};

use crate::client::{ReconClient, Scan, ScanApi};
use crate::config::Config;

/// Maximum number of completion candidates to return
const MAX_COMPLETIONS: usize = 25;

/// Timeout for completion API calls
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a blocking runtime for completion API calls.
///
/// Completers are called synchronously by the shell.
fn blocking_runtime() -> Option<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .ok()
}

/// Build a client from env overrides and the config file.
///
/// Completions should never break the shell, so all errors are silent.
fn completion_client() -> Option<ReconClient> {
    let config_path = std::env::var("RECONBOARD_CONFIG").ok();
    let config = Config::load_or_default(config_path.as_deref()).ok()?;
    let url_override = std::env::var("RECONBOARD_API_URL").ok();

    ReconClient::with_base_url(config.api_url(url_override.as_deref())).ok()
}

/// Complete scan IDs.
///
/// Format: `{id}` with help `{domain} | {status}`, in display order
pub fn complete_scan_ids() -> Vec<CompletionCandidate> {
    let Some(client) = completion_client() else {
        return vec![];
    };

    let Some(rt) = blocking_runtime() else {
        return vec![];
    };

    let result = rt.block_on(async {
        tokio::time::timeout(COMPLETION_TIMEOUT, client.list_scans()).await
    });

    match result {
        Ok(Ok(scans)) => candidates(scans),
        _ => vec![],
    }
}

fn candidates(mut scans: Vec<Scan>) -> Vec<CompletionCandidate> {
    scans.sort_by_key(|s| s.display_order);
    scans
        .into_iter()
        .take(MAX_COMPLETIONS)
        .map(|scan| {
            let help = format!("{} | {}", scan.domain, scan.status);
            CompletionCandidate::new(scan.id.to_string()).help(Some(help.into()))
        })
        .collect()
}

/// Create completion candidates for scan IDs.
pub fn scan_id_candidates() -> ArgValueCandidates {
    ArgValueCandidates::new(complete_scan_ids)
}
