//! Browser-facing API server for the pageforge generation engine.
//!
//! `pageforge-web` is the collaborator boundary between the browser UI and
//! the generation core: an axum server exposing the generate, translate
//! and recommend calls as REST endpoints, with CORS open for a dev
//! frontend and optional static-file serving for a production build. The
//! UI itself (forms, tabs, theming) lives in the frontend and is not
//! modeled here.
//!
//! # Quick start
//!
//! ```ignore
//! use pageforge_rs::GeminiClient;
//! use pageforge_web::{WebConfig, spawn_web};
//! use std::sync::Arc;
//!
//! let client = Arc::new(GeminiClient::new(api_key)?);
//! let config = WebConfig::default();
//! let addr = spawn_web(client, config).await;
//! println!("API: http://{addr}");
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser form ──POST /api/generate──▶ generate() ──▶ Gemini
//!       ▲                                  │
//!       └────── GenerationResult JSON ◀────┘ (fallback ladder applied)
//! ```
//!
//! Validation failures come back as 422 with the missing field names;
//! engine failures map to 502 (upstream/empty/decode) or 503 (transport,
//! worth retrying) with a single human-readable message and nothing else.

mod api;
mod server;

pub use api::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use pageforge_rs::{DEFAULT_MODEL, GeminiClient};

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Directory with a production frontend build to serve as a fallback.
    pub static_dir: Option<PathBuf>,
    /// Model used for all engine calls.
    pub model: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([127, 0, 0, 1], 3001).into(),
            static_dir: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Build the router, start the server, and return the bound address.
pub async fn spawn_web(client: Arc<GeminiClient>, config: WebConfig) -> SocketAddr {
    let state = AppState {
        client,
        model: config.model,
    };
    let router = server::build_router(state, config.static_dir);
    server::start_server(router, config.bind_addr).await
}
