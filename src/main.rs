//! Gateway Studio - headless console for gateway applications
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use gateway_studio::{run_command, Command, HeadlessEvent};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Gateway Studio - manage gateway application configurations
#[derive(Parser, Debug)]
#[command(name = "studio")]
#[command(about = "Manage gateway application configurations", long_about = None)]
struct Args {
    /// Project directory holding the application store
    #[arg(long, value_name = "PATH", global = true)]
    project: Option<PathBuf>,

    /// Answer "yes" to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    studio_core::logging::init()?;

    let args = Args::parse();
    let project_path = args
        .project
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    // Ctrl+C abandons an in-flight deploy/undeploy
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupted, cancelling");
                on_signal.cancel();
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    let result = run_command(&project_path, args.command, args.yes, cancel).await;

    if let Err(e) = result {
        if e.is_recoverable() {
            warn!("Command failed: {}", e);
        } else {
            error!("Command failed: {:?}", e);
        }
        HeadlessEvent::error(e.to_string(), e.is_fatal()).emit();
        std::process::exit(1);
    }

    info!("Gateway Studio exiting");
    Ok(())
}
