use std::path::PathBuf;

use beacon::config::Config;
use beacon::server;
use clap::Parser;

/// Minimal HTTP/1.1 server with echo, user-agent and file routes
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory served and written by /files/<name>
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Listen address, overrides LISTEN and the config file
    #[arg(long)]
    listen: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    let mut cfg = Config::load(args.config.as_deref())?;

    if let Some(dir) = args.directory {
        cfg.directory = Some(dir);
    }
    if let Some(addr) = args.listen {
        cfg.listen_addr = addr;
    }

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
