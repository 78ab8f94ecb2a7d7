//! Reconboard CLI - terminal dashboard for domain reconnaissance scans

use clap::{CommandFactory, Parser};
use clap_complete::CompleteEnv;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod reorder;
mod store;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, ScanCommands};
use error::Result;

#[tokio::main]
async fn main() {
    // Handles COMPLETE=<shell> and exits; otherwise a no-op
    CompleteEnv::with_factory(Cli::command).complete();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Health => cli::health::run(&opts).await,
        Commands::Version => {
            println!("reconboard version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Scan(scan_cmd) => match scan_cmd {
            ScanCommands::List => cli::scan::list(&opts).await,
            ScanCommands::Get { scan_id, section } => {
                cli::scan::get(&opts, scan_id, section).await
            }
            ScanCommands::Create {
                domain,
                timeout,
                active,
            } => cli::scan::create(&opts, domain, timeout, active).await,
            ScanCommands::Move {
                source_id,
                target_id,
            } => cli::scan::move_scan(&opts, source_id, target_id).await,
            ScanCommands::Reorder { scan_id, new_order } => {
                cli::scan::reorder(&opts, scan_id, new_order).await
            }
        },
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "reconboard",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
