//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use completions::scan_id_candidates;

pub mod args;
pub mod completions;
pub mod context;
pub mod health;
pub mod init;
pub mod scan;
pub mod status;

pub use args::{OutputFormat, Section};
pub use context::CommandContext;

/// Reconboard - terminal dashboard for domain reconnaissance scans
#[derive(Parser, Debug)]
#[command(name = "reconboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "RECONBOARD_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Scan service base URL (e.g. http://127.0.0.1:8080/api)
    #[arg(long, global = true, env = "RECONBOARD_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "RECONBOARD_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "RECONBOARD_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Reconboard configuration
    Init,

    /// Show configuration status
    Status,

    /// Check that the scan service is reachable
    Health,

    /// Display version information
    Version,

    /// List, start and reorder scans
    #[command(subcommand)]
    Scan(ScanCommands),

    /// Generate shell completions (static)
    #[command(after_help = "\
Static completions (subcommands/flags only):
  bash:   reconboard completion bash > /etc/bash_completion.d/reconboard
  zsh:    reconboard completion zsh > \"${fpath[1]}/_reconboard\"
  fish:   reconboard completion fish > ~/.config/fish/completions/reconboard.fish

Dynamic completions (includes scan IDs from the scan service):
  bash:   echo 'source <(COMPLETE=bash reconboard)' >> ~/.bashrc
  zsh:    echo 'source <(COMPLETE=zsh reconboard)' >> ~/.zshrc
  fish:   echo 'COMPLETE=fish reconboard | source' >> ~/.config/fish/config.fish")]
    Completion {
        /// Shell to generate completions for (static only)
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Scan management subcommands
#[derive(Subcommand, Debug)]
pub enum ScanCommands {
    /// List all scans in display order
    #[command(visible_alias = "ls")]
    List,

    /// Show one scan with its results
    #[command(
        visible_alias = "g",
        after_help = "EXAMPLES:\n  \
            reconboard scan get 3                      # Overview with all results\n  \
            reconboard scan get 3 --section subdomains # Only the subdomains\n  \
            reconboard scan get 3 --format json | jq '.data.results.ips'"
    )]
    Get {
        /// Scan ID
        #[arg(add = scan_id_candidates())]
        scan_id: i64,

        /// Show only one results section
        #[arg(long, short = 's', value_enum)]
        section: Option<Section>,
    },

    /// Start a new scan (prompts for the domain when omitted)
    #[command(after_help = "EXAMPLES:\n  \
            reconboard scan create example.com                 # Passive scan, default timeout\n  \
            reconboard scan create example.com --active -t 30  # Active scan, 30 minute timeout\n  \
            reconboard scan create                             # Interactive form")]
    Create {
        /// Target domain (e.g. example.com)
        domain: Option<String>,

        /// Scan timeout in minutes (5-120)
        #[arg(long, short = 't', value_parser = clap::value_parser!(u32).range(5..=120))]
        timeout: Option<u32>,

        /// Run active checks instead of passive-only
        #[arg(long)]
        active: bool,
    },

    /// Drag one scan onto another scan's position
    #[command(after_help = "EXAMPLES:\n  \
            reconboard scan move 7 2   # Scan 7 takes scan 2's place")]
    Move {
        /// Scan being moved
        #[arg(add = scan_id_candidates())]
        source_id: i64,

        /// Scan whose position it takes
        #[arg(add = scan_id_candidates())]
        target_id: i64,
    },

    /// Set a scan's display order directly
    Reorder {
        /// Scan ID
        #[arg(add = scan_id_candidates())]
        scan_id: i64,

        /// New display order
        #[arg(allow_negative_numbers = true)]
        new_order: i64,
    },
}
