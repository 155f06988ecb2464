//! The generation pipeline: brief in, three-part page architecture out.
//!
//! [`generate`] is the single entry point: it builds the instruction and
//! prompt from a [`GenerationRequest`], issues one completion call at the
//! fixed generation temperature, and hands the raw text to
//! [`extract::extract_sections`]. The request/result types here are the
//! wire form exchanged with the browser frontend, so field names serialize
//! in camelCase.

pub mod assist;
pub mod extract;
pub mod prompt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::{Content, GenerateContentRequest, GeminiClient, GenerationConfig};

pub use extract::extract_sections;
pub use prompt::{SECTION_MARKERS, build_instruction, build_prompt};

// ── Defaults ───────────────────────────────────────────────────────

/// Accent color applied when the brief leaves `colorPreference` unset
/// (indigo-600).
pub const DEFAULT_ACCENT_COLOR: &str = "#4F46E5";

/// Output language applied when the brief leaves `targetLanguage` unset.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Persona labels offered by the tone selector. The field stays free text
/// — the selector is editable, not a closed enum.
pub const TONE_PRESETS: [&str; 5] = [
    "Professional & Modern",
    "Minimalist & Luxury",
    "Vibrant & Creative",
    "Bold & Aggressive",
    "Empathetic & Warm",
];

// ── Request / result ───────────────────────────────────────────────

/// User-supplied parameters for one generation attempt.
///
/// The three required fields must be non-empty before a request is issued;
/// that is a caller-side check (see [`GenerationRequest::missing_fields`]),
/// not an engine failure.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Free-form description of the business. Required.
    pub business_idea: String,
    /// Who the page is for. Required.
    pub target_audience: String,
    /// What the page should make visitors do. Required.
    pub primary_goal: String,
    /// Persona label, usually one of [`TONE_PRESETS`].
    pub tone_style: String,
    /// Hex accent color. Defaults to [`DEFAULT_ACCENT_COLOR`].
    #[serde(default)]
    pub color_preference: Option<String>,
    /// Free text; may enumerate desired page sections, each of which must
    /// then appear in the output.
    #[serde(default)]
    pub extra_notes: Option<String>,
    /// Natural-language name of the output language ("English",
    /// "Français", ...). Defaults to [`DEFAULT_LANGUAGE`].
    #[serde(default)]
    pub target_language: Option<String>,
}

impl GenerationRequest {
    /// Names of required fields that are empty or whitespace-only.
    ///
    /// An empty return means the request satisfies the non-empty-required-
    /// fields invariant and may be issued.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.business_idea.trim().is_empty() {
            missing.push("businessIdea");
        }
        if self.target_audience.trim().is_empty() {
            missing.push("targetAudience");
        }
        if self.primary_goal.trim().is_empty() {
            missing.push("primaryGoal");
        }
        missing
    }

    /// The accent color to use, falling back to the indigo default.
    pub fn accent_color(&self) -> &str {
        self.color_preference
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_ACCENT_COLOR)
    }

    /// The output language, falling back to English.
    pub fn language(&self) -> &str {
        self.target_language
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Notes text, empty string when unset.
    pub fn notes(&self) -> &str {
        self.extra_notes.as_deref().unwrap_or("").trim()
    }
}

/// The parsed model output: one field per tab.
///
/// None of the three fields is ever empty — the extractor substitutes
/// fallback content for any section it cannot locate. The value is
/// immutable once constructed and owned by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Markup fragment meant to render standalone inside an isolated
    /// document: starts with a root container element, no outer
    /// `<html>`/`<body>`.
    pub preview_html: String,
    /// Plain narrative text, no markup.
    pub strategy: String,
    /// Text blob, typically fenced code blocks with a full source bundle.
    pub code: String,
}

// ── Entry point ────────────────────────────────────────────────────

/// Run one generation: prompt construction, a single completion call, and
/// section extraction.
///
/// The only errors raised are [`EngineError::EmptyResponse`] (the model
/// returned nothing) and the upstream/transport failures of the call
/// itself. A response that merely ignores the structure contract still
/// produces an `Ok` result via the fallback ladder.
pub async fn generate(
    client: &GeminiClient,
    model: &str,
    request: &GenerationRequest,
) -> Result<GenerationResult, EngineError> {
    let instruction = build_instruction(request);
    let user_prompt = build_prompt(request);

    let body = GenerateContentRequest {
        system_instruction: Some(Content::bare(instruction)),
        contents: vec![Content::user(user_prompt)],
        generation_config: Some(GenerationConfig {
            temperature: Some(crate::GENERATION_TEMPERATURE),
            response_mime_type: None,
        }),
    };

    let raw = client.generate_content(model, &body).await?;
    let result = extract_sections(&raw)?;
    debug!(
        "generation parsed: preview={}B, strategy={}B, code={}B",
        result.preview_html.len(),
        result.strategy.len(),
        result.code.len(),
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            business_idea: "A task app".into(),
            target_audience: "freelancers".into(),
            primary_goal: "signups".into(),
            tone_style: "Professional & Modern".into(),
            color_preference: Some("#4F46E5".into()),
            extra_notes: Some(String::new()),
            target_language: Some("English".into()),
        }
    }

    #[test]
    fn missing_fields_reports_wire_names() {
        let mut req = request();
        assert!(req.missing_fields().is_empty());

        req.business_idea = "  ".into();
        req.primary_goal = String::new();
        assert_eq!(req.missing_fields(), vec!["businessIdea", "primaryGoal"]);
    }

    #[test]
    fn defaults_applied_for_unset_optionals() {
        let req = GenerationRequest {
            color_preference: None,
            extra_notes: None,
            target_language: None,
            ..request()
        };
        assert_eq!(req.accent_color(), DEFAULT_ACCENT_COLOR);
        assert_eq!(req.language(), DEFAULT_LANGUAGE);
        assert_eq!(req.notes(), "");

        // Empty strings count as unset, matching how the form submits.
        let req = GenerationRequest {
            color_preference: Some("  ".into()),
            target_language: Some(String::new()),
            ..request()
        };
        assert_eq!(req.accent_color(), DEFAULT_ACCENT_COLOR);
        assert_eq!(req.language(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn request_deserializes_from_camel_case() {
        let json = r#"{
            "businessIdea": "A task app",
            "targetAudience": "freelancers",
            "primaryGoal": "signups",
            "toneStyle": "Professional & Modern"
        }"#;
        let req: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.business_idea, "A task app");
        assert!(req.color_preference.is_none());
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = GenerationResult {
            preview_html: "<main></main>".into(),
            strategy: "plan".into(),
            code: "```html```".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("previewHtml").is_some());
        assert!(json.get("preview_html").is_none());
    }
}
