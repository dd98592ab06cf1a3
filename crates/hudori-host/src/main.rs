//! # hudori
//!
//! Host process for the bridge. The desktop shell spawns it and talks to it over
//! stdio, one JSON request per line; it can also run a single operation from the
//! command line, which is handy against a local backend.
//!
//! Logs go to stderr so stdout carries nothing but replies.

mod serve;

use clap::{Parser, Subcommand};
use hudori_bridge::{Bridge, commands};
use hudori_common::config::BridgeConfig;

#[derive(Debug, Parser)]
#[command(name = "hudori", version, about = "Hudori desktop bridge host")]
struct Cli {
    /// Backend origin; overrides HUDORI__API__BASE_URL and hudori.toml
    #[arg(long)]
    base_url: Option<String>,

    /// Write logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Answer line-delimited JSON requests from stdin until it closes
    Serve,
    /// Run one operation and print its result
    Call {
        /// Operation name, e.g. `get_friends`
        operation: String,
        /// JSON envelope
        #[arg(default_value = "{}")]
        args: String,
    },
    /// List every operation the bridge understands
    Endpoints,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (structured logging)
    let logs = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hudori=info,hudori_bridge=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    let mut config = BridgeConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    match cli.command {
        Command::Endpoints => {
            for name in commands::operations() {
                println!("{name}");
            }
        }
        Command::Call { operation, args } => {
            let bridge = Bridge::new(config)?;
            let result = bridge.invoke(&operation, &args).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Serve => {
            tracing::info!("hudori bridge v{} serving {}", env!("CARGO_PKG_VERSION"), config.api.base_url);
            let bridge = Bridge::new(config)?;
            serve::run(bridge).await?;
        }
    }
    Ok(())
}
