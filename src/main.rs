use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use tokio::signal;

use crate::{cli::Args, errors::Result, runlog::LogFile, vars::SWEEPERD_CONFIG_FILE};

mod cli;
mod config;
mod errors;
mod janitor;
mod logger;
mod runlog;
mod scheduler;
mod vars;

#[tokio::main]
async fn main() -> Result<()> {
    env_setup();
    let args = Args::parse();
    let config_path = args
        .config
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(*SWEEPERD_CONFIG_FILE));

    if args.cleanup {
        cli::cleanup::run(&config_path);
    } else {
        daemon(&config_path).await?;
    }

    Ok(())
}

async fn daemon(config_path: &Path) -> Result<()> {
    // Initialize the logger
    logger::init();
    // 配置错误在进入循环前直接退出
    let config = config::load(config_path)?.resolve()?;
    let sink = LogFile::new(&config.log_file);
    info!(
        "sweeperd started, watching: {} (retention: {} days, interval: {})",
        config.root.display(),
        config.retention_days,
        humantime::format_duration(config.interval),
    );
    scheduler::run(config, sink, shutdown_signal()).await;

    Ok(())
}

fn env_setup() {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
