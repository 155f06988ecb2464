//! Generate a landing-page architecture from a business brief and print it.
//!
//! Reads the API key from the `GEMINI_API_KEY` environment variable.
//!
//! # Examples
//!
//! ```sh
//! # Basic generation
//! pageforge --idea "A task app" --audience "freelancers" --goal "signups"
//!
//! # Full brief with localized output
//! pageforge --idea "Abonnements café artisanal" --audience "télétravailleurs" \
//!   --goal "inscriptions" --tone "Empathetic & Warm" --language "Français" \
//!   --notes "Pricing, FAQ"
//!
//! # Machine-readable output
//! pageforge --idea "A task app" --audience "freelancers" --goal "signups" --json
//!
//! # Only suggest page sections for an idea
//! pageforge --idea "A task app" --recommend
//! ```

use clap::Parser;
use pageforge_rs::generator::assist::recommend_sections;
use pageforge_rs::generator::prompt::{CODE_MARKER, PREVIEW_MARKER, STRATEGY_MARKER};
use pageforge_rs::generator::{GenerationRequest, generate};
use pageforge_rs::{DEFAULT_MODEL, GeminiClient};
use std::process;
use tracing_subscriber::EnvFilter;

/// Generate a landing-page architecture from a business brief.
///
/// Reads the API key from the GEMINI_API_KEY environment variable.
#[derive(Parser)]
#[command(name = "pageforge")]
struct Cli {
    // ── Brief ──────────────────────────────────────────────────
    /// Business idea (required)
    #[arg(long)]
    idea: String,

    /// Target audience
    #[arg(long, default_value = "")]
    audience: String,

    /// Primary goal of the page
    #[arg(long, default_value = "")]
    goal: String,

    /// Tone & style persona label
    #[arg(long, default_value = "Professional & Modern")]
    tone: String,

    /// Hex accent color (defaults to indigo)
    #[arg(long)]
    color: Option<String>,

    /// Extra notes; may enumerate desired page sections
    #[arg(long)]
    notes: Option<String>,

    /// Output language for all user-facing copy
    #[arg(long)]
    language: Option<String>,

    // ── Model selection ────────────────────────────────────────
    /// Model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    // ── Output mode ────────────────────────────────────────────
    /// Print the result as a JSON object instead of marked sections
    #[arg(long)]
    json: bool,

    /// Only print recommended page sections for the idea and exit
    #[arg(long)]
    recommend: bool,
}

async fn run(cli: &Cli) -> Result<String, String> {
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| "Set GEMINI_API_KEY env var to your API key".to_string())?;
    let client = GeminiClient::new(api_key).map_err(|e| e.to_string())?;

    if cli.recommend {
        let sections = recommend_sections(&client, &cli.model, &cli.idea)
            .await
            .map_err(|e| e.to_string())?;
        return Ok(sections.join("\n") + "\n");
    }

    let request = GenerationRequest {
        business_idea: cli.idea.clone(),
        target_audience: cli.audience.clone(),
        primary_goal: cli.goal.clone(),
        tone_style: cli.tone.clone(),
        color_preference: cli.color.clone(),
        extra_notes: cli.notes.clone(),
        target_language: cli.language.clone(),
    };

    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(format!("missing required fields: {}", missing.join(", ")));
    }

    let result = generate(&client, &cli.model, &request)
        .await
        .map_err(|e| e.to_string())?;

    if cli.json {
        return serde_json::to_string_pretty(&result).map_err(|e| e.to_string());
    }

    Ok(format!(
        "{PREVIEW_MARKER}\n{}\n\n{STRATEGY_MARKER}\n{}\n\n{CODE_MARKER}\n{}\n",
        result.preview_html, result.strategy, result.code,
    ))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
