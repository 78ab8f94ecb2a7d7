//! Command execution context
//!
//! Resolves configuration, output format and the scan service client once per
//! command, so handlers start from a ready-to-use store.

use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::ReconClient;
use crate::config::Config;
use crate::error::Result;
use crate::output::progress::spinner;
use crate::store::ScanStore;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists)
    pub config: Config,
    /// Scan service client, shared with the store
    pub client: Arc<ReconClient>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if the config file exists but is invalid, or the
    /// resolved API URL is unusable.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default(opts.config_ref())?;

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_config)
            })
            .unwrap_or_default();

        let api_url = config.api_url(opts.api_url_ref());
        debug!("Using scan service at {}", api_url);
        let client = Arc::new(ReconClient::with_base_url(api_url)?);

        Ok(Self {
            config,
            client,
            format,
        })
    }

    /// Create a store and perform its initial load.
    ///
    /// A failed load leaves the store empty with `last_error` set.
    pub async fn mount_store(&self) -> ScanStore<ReconClient> {
        let pb = spinner("Loading scans...");
        let store = ScanStore::mount(self.client.clone()).await;
        pb.finish_and_clear();
        store
    }
}
