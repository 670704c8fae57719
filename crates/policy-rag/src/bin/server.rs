//! Policy assistant server binary
//!
//! Run with: cargo run -p policy-rag --bin policy-rag-server -- --document policy.docx

use clap::Parser;
use policy_rag::{config::PolicyRagConfig, server::PolicyServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Answer questions about a policy document")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "POLICY_RAG_CONFIG")]
    config: Option<PathBuf>,

    /// Policy document (.docx or plain text)
    #[arg(short, long)]
    document: Option<PathBuf>,

    /// Host to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = PolicyRagConfig::load(args.config.as_deref())?;
    if let Some(document) = args.document {
        config.document.path = document;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Document: {}", config.document.path.display());
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_max_len);
    tracing::info!("  - Gateway: {}", config.gateway.endpoint);
    tracing::info!("  - History window: {} turns", config.chat.max_history_turns);

    let server = PolicyServer::new(config).await?;

    println!("\nServer starting...");
    println!("  Client: http://{}/", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /chat      - Ask a question");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
