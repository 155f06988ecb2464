//! AI landing-page generation engine.
//!
//! `pageforge-rs` turns a short business brief into three deliverables — an
//! HTML preview, a marketing strategy narrative, and a deployable source
//! bundle — by prompting a generative text model and recovering structure
//! from its free-text reply. The model is the only source of structured
//! data, so the heart of the crate is the section-extraction layer and its
//! fallback ladder: a usable three-part result is always preferred over a
//! hard failure once any text came back at all.
//!
//! # Getting started
//!
//! ```ignore
//! use pageforge_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EngineError> {
//!     let api_key = std::env::var("GEMINI_API_KEY").unwrap();
//!     let client = GeminiClient::new(api_key)?;
//!
//!     let request = GenerationRequest {
//!         business_idea: "A task app".into(),
//!         target_audience: "freelancers".into(),
//!         primary_goal: "signups".into(),
//!         tone_style: "Professional & Modern".into(),
//!         color_preference: None,
//!         extra_notes: None,
//!         target_language: None,
//!     };
//!
//!     let result = generate(&client, DEFAULT_MODEL, &request).await?;
//!     println!("{}", result.strategy);
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Build the prompt contract:** [`generator::prompt`] — the section
//!   markers the model must emit and the instruction/prompt pair built
//!   from a [`GenerationRequest`](generator::GenerationRequest).
//! - **Recover sections from raw text:** [`generator::extract`] — the
//!   two-pass marker search plus per-section fallback content.
//! - **Run the whole pipeline:** [`generator::generate`].
//! - **Auxiliary calls:** [`generator::assist`] — brief translation and
//!   page-section recommendations, both with a JSON reply contract.
//!
//! # Design principles
//!
//! 1. **Degrade, don't fail.** Once the model returned text, every parsing
//!    miss becomes placeholder content, never an error. Only an empty
//!    completion or a failed call surfaces as [`EngineError`].
//! 2. **The markers are the contract.** `=== PREVIEW ===` and friends are
//!    the sole structural agreement between this crate and an uncontrolled
//!    text source. They are fixed literals owned here, escaped before any
//!    pattern matching, searched in declared order, first occurrence wins.
//! 3. **Pure core, thin edge.** Prompt construction and extraction are
//!    pure functions with no shared state; the single suspension point is
//!    the HTTP call, and retry/deadline policy belongs to the caller.

pub mod error;
pub mod generator;
pub mod prelude;

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub use error::EngineError;

// ── Constants ──────────────────────────────────────────────────────

/// Base URL of the Gemini `generateContent` API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model for all engine calls.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Temperature for the main page-generation call.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Temperature for the auxiliary translate/recommend calls, which want
/// near-deterministic, strictly-shaped output.
pub const ASSIST_TEMPERATURE: f32 = 0.2;

// ── Request types ──────────────────────────────────────────────────

/// `generateContent` request body. Superset of the fields this engine
/// uses — unset optional fields are omitted from serialization.
#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Standing instruction applied to the whole request (the output
    /// structure contract lives here).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    /// Conversation turns. This engine always sends a single user turn.
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A content block: an optional role plus one or more text parts.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    /// A user-role content block with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// A role-less content block, as expected for `systemInstruction`.
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Part {
    pub text: String,
}

/// Decoding parameters.
#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Set to `"application/json"` for the auxiliary calls that expect a
    /// JSON reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawGenerateResponse {
    candidates: Option<Vec<RawCandidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug)]
struct RawCandidate {
    content: Option<RawCandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawCandidateContent {
    parts: Option<Vec<Part>>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    message: String,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the Gemini `generateContent` API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client with the given API key and the production
    /// endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, EngineError> {
        Self::with_base_url(api_key, GEMINI_API_BASE)
    }

    /// Create a client against a custom base URL. Integration tests point
    /// this at a stub upstream.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent("pageforge/0.1")
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Send a `generateContent` request and return the completion text of
    /// the first candidate (parts concatenated).
    ///
    /// Returns an empty string when the API answered successfully but
    /// produced no candidate text — callers decide whether that is an
    /// [`EngineError::EmptyResponse`].
    pub async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, EngineError> {
        let url = format!("{}/{model}:generateContent", self.base_url);
        debug!(
            "engine request: model={}, turns={}, has_system={}",
            model,
            body.contents.len(),
            body.system_instruction.is_some(),
        );
        trace!(
            "request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        let elapsed = start.elapsed();
        debug!(
            "engine response: HTTP {} in {:.1}s ({} bytes)",
            status,
            elapsed.as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(EngineError::Upstream {
                message: format!("HTTP {status}: {text}"),
            });
        }

        let parsed: RawGenerateResponse = serde_json::from_str(&text)?;

        if let Some(err) = parsed.error {
            return Err(EngineError::Upstream {
                message: err.message,
            });
        }

        let candidate = parsed.candidates.and_then(|c| c.into_iter().next());

        let completion = match candidate {
            Some(c) => {
                if let Some(ref reason) = c.finish_reason
                    && reason != "STOP"
                {
                    debug!("engine finished with reason {reason}");
                }
                c.content
                    .and_then(|content| content.parts)
                    .map(|parts| {
                        parts
                            .into_iter()
                            .map(|p| p.text)
                            .collect::<Vec<_>>()
                            .concat()
                    })
                    .unwrap_or_default()
            }
            None => {
                debug!("engine output: empty (no candidates)");
                String::new()
            }
        };

        debug!("engine output: {} chars", completion.len());
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_constructors() {
        let user = Content::user("hello");
        assert_eq!(user.role.as_deref(), Some("user"));
        assert_eq!(user.parts.len(), 1);

        let system = Content::bare("contract");
        assert!(system.role.is_none());
    }

    #[test]
    fn request_skips_unset_fields() {
        let req = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::user("hi")],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.7),
                response_mime_type: None,
            }),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("systemInstruction").is_none());
        assert!(json["generationConfig"].get("responseMimeType").is_none());
        // The f32 widens through serde_json; compare in f64.
        assert_eq!(
            json["generationConfig"]["temperature"],
            f64::from(0.7f32)
        );
        // The user turn carries its role.
        assert!(json["contents"][0].get("role").is_some());
    }

    #[test]
    fn bare_content_omits_the_role_key() {
        let json = serde_json::to_value(Content::bare("contract")).unwrap();
        // A role-less block must drop the key entirely, not emit null.
        assert!(json.get("role").is_none());
        assert_eq!(json["parts"][0]["text"], "contract");
    }

    #[test]
    fn raw_response_parses_candidate_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "one"}, {"text": "two"}]},
                 "finishReason": "STOP"}
            ]
        }"#;
        let parsed: RawGenerateResponse = serde_json::from_str(body).unwrap();
        let parts = parsed.candidates.unwrap()[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .as_ref()
            .unwrap()
            .len();
        assert_eq!(parts, 2);
    }

    #[test]
    fn raw_response_tolerates_missing_candidates() {
        let parsed: RawGenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_none());
        assert!(parsed.error.is_none());
    }
}
