//! Landing-page generation API server.
//!
//! Serves the REST endpoints the browser frontend calls, and optionally a
//! production frontend build.
//!
//! # Usage
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run -p pageforge-web
//! GEMINI_API_KEY=... cargo run -p pageforge-web -- --port 8080
//! GEMINI_API_KEY=... cargo run -p pageforge-web -- --model gemini-2.5-flash
//! GEMINI_API_KEY=... cargo run -p pageforge-web -- --static-dir dist/
//! ```
//!
//! Then point the frontend (or curl) at the printed URL:
//!
//! ```bash
//! curl -X POST http://127.0.0.1:3001/api/generate \
//!   -H 'Content-Type: application/json' \
//!   -d '{"businessIdea":"A task app","targetAudience":"freelancers",
//!        "primaryGoal":"signups","toneStyle":"Professional & Modern"}'
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pageforge_rs::{DEFAULT_MODEL, GeminiClient};
use pageforge_web::{WebConfig, spawn_web};
use tracing_subscriber::EnvFilter;

/// Landing-page generation API server.
#[derive(Parser)]
#[command(about = "API server for the pageforge generation engine")]
struct Args {
    /// Model to use for all engine calls.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Port to bind the server to.
    #[arg(long, default_value_t = 3001)]
    port: u16,

    /// Directory with a production frontend build to serve.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| "Set GEMINI_API_KEY env var to your API key")?;
    let client = Arc::new(GeminiClient::new(api_key).map_err(|e| e.to_string())?);

    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], args.port).into(),
        static_dir: args.static_dir,
        model: args.model,
    };

    let addr = spawn_web(client, config).await;
    println!("API: http://{addr}");
    println!("Waiting for requests from the browser...\n");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    Ok(())
}
