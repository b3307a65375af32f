//! LAN Swarm command line.
//!
//! ```text
//! lanswarm tracker [--port <PORT>]
//! lanswarm share <PATH> [--port <PORT>]
//! lanswarm get <HASH> <OUTPUT> [--port <PORT>]
//! ```
//!
//! `--port` overrides the bind port of the server the role runs: the tracker
//! server for `tracker`, the peer transfer server for `share` and `get`.
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lanswarm::{app, bootstrap};
use lanswarm_primitives::content_hash::ContentHash;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs the tracker.
    Tracker {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Shares a local file until the process is stopped.
    Share {
        path: PathBuf,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Downloads a file from the swarm and shares it afterwards.
    Get {
        hash: ContentHash,
        output: PathBuf,
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = bootstrap::app::setup().context("unable to load the configuration")?;

    let jobs = match args.command {
        Command::Tracker { port } => {
            if let Some(port) = port {
                config.tracker.bind_address.set_port(port);
            }

            let tracker = bootstrap::app::initialize_tracker(&config);

            app::start_tracker(&config, tracker).await?
        }
        Command::Share { path, port } => {
            if let Some(port) = port {
                config.peer.bind_address.set_port(port);
            }

            let (content_hash, seeder) = app::share(&config, &path)
                .await
                .with_context(|| format!("unable to share {}", path.display()))?;

            println!("Sharing {} as {content_hash}", path.display());

            seeder.jobs
        }
        Command::Get { hash, output, port } => {
            if let Some(port) = port {
                config.peer.bind_address.set_port(port);
            }

            let (metadata, seeder) = app::get(&config, &hash, &output)
                .await
                .with_context(|| format!("unable to download {hash}"))?;

            println!("Downloaded {} ({} bytes) to {}", metadata.name, metadata.size, output.display());

            seeder.jobs
        }
    };

    jobs.wait().await;

    info!("LAN Swarm successfully shutdown.");

    Ok(())
}
