//! gun-http - HTTP endpoints for a Gun-style key-value graph store

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gun_http::api::{self, ServerOptions};
use gun_http::config::Config;
use gun_http::store::MemoryGraph;
use gun_http::{Adapter, GetOptions, GraphData};

#[derive(Parser)]
#[command(name = "gun-http")]
#[command(about = "HTTP endpoints for a Gun-style key-value graph store")]
#[command(version)]
struct Cli {
    /// Path to data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config into the data directory
    Init,

    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Keep the graph in memory only
        #[arg(long)]
        no_persist: bool,
    },

    /// Print a node from the snapshot
    Get {
        /// Soul of the node
        soul: String,

        /// Only print this field
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Merge a JSON graph file into the snapshot
    Put {
        /// File containing a graph fragment
        file: PathBuf,
    },

    /// Show graph statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("gun_http={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    let config = match &cli.data_dir {
        Some(dir) => Config::load_from_dir(dir.clone())?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Init => {
            tracing::info!("Initializing data directory at {:?}", config.data_dir);
            config.save()?;

            println!("✓ Config written to {}", config.config_path().display());
            println!("\nRun `gun-http serve` to start the server");
        }

        Commands::Serve { port, host, no_persist } => {
            let mut config = config;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }

            let graph = if config.persist && !no_persist {
                MemoryGraph::open(&config.snapshot_path())?
            } else {
                MemoryGraph::new()
            };

            let router = api::create_server(graph, ServerOptions::from(&config))?;

            let address = config.bind_address();
            let listener = tokio::net::TcpListener::bind(&address).await?;
            tracing::info!("Starting HTTP server on {}", address);

            println!("gun-http server running at http://{}", address);
            println!("  Nodes: http://{}/gun/nodes/<soul>", address);
            println!("  Keys:  http://{}/gun/key/<key>/from_node/<soul>", address);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }

        Commands::Get { soul, key } => {
            let adapter = Adapter::new(MemoryGraph::open(&config.snapshot_path())?)?;
            let opts = key.map(GetOptions::single_key);

            let json = adapter.read(&soul, opts.as_ref()).await?;
            if json.is_empty() {
                println!("null");
            } else {
                let value: serde_json::Value = serde_json::from_str(&json)?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        }

        Commands::Put { file } => {
            let content = std::fs::read_to_string(&file)?;
            let data: GraphData = serde_json::from_str(&content)?;

            let adapter = Adapter::new(MemoryGraph::open(&config.snapshot_path())?)?;
            let diff = adapter.write(&data).await?;

            println!("{}", serde_json::to_string_pretty(&diff)?);
        }

        Commands::Stats => {
            let graph = MemoryGraph::open(&config.snapshot_path())?;
            let stats = graph.stats()?;

            println!("gun-http Statistics");
            println!("===================");
            println!("Snapshot: {}", config.snapshot_path().display());
            println!();
            println!("Nodes:  {}", stats.nodes);
            println!("Fields: {}", stats.fields);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
