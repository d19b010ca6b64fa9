// File: installer/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use installer::cli::CliOptions;
use installer::services::{AutoConfirm, ConfirmationPrompt, ConsolePrompt, LogStatusSink};
use installer::{ConfigManager, InstallOutcome, Installer};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("installer=info".parse()?);
    fmt().with_env_filter(env_filter).init();

    info!("Starting blockchain installer");

    let options = CliOptions::parse(std::env::args().skip(1))?;

    let config_manager = ConfigManager::new(options.config_path).await?;
    let config = config_manager.get_current_config();

    // Ctrl-C stops an in-flight copy between chunks
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling blockchain copy");
                cancel.cancel();
            }
        }
    });

    let prompt: Arc<dyn ConfirmationPrompt> = if options.assume_yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(ConsolePrompt)
    };

    let installer =
        Installer::new(&config, prompt, Arc::new(LogStatusSink)).with_cancellation(cancel);

    let report = installer.exec().await;
    match report.outcome {
        InstallOutcome::Installed { bytes_copied } => {
            info!("Blockchain installation finished ({} bytes)", bytes_copied)
        }
        InstallOutcome::Skipped(reason) => info!("Nothing installed: {}", reason),
        InstallOutcome::Declined(_) => info!("Installed blockchain left unchanged"),
        InstallOutcome::Failed(e) => error!("Blockchain installation failed: {}", e),
    }

    Ok(())
}
