//! Auxiliary model calls: brief translation and section recommendations.
//!
//! Same response-parsing discipline as the main pipeline, at smaller
//! scale: each call declares an exact JSON reply shape, requests the JSON
//! MIME type, strips any stray code fences the model wrapped the payload
//! in, and decodes with serde. A reply that breaks the shape is an
//! [`EngineError::Decode`] — there is no fallback ladder here because
//! these calls are conveniences, not the product.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::{ASSIST_TEMPERATURE, Content, GenerateContentRequest, GeminiClient, GenerationConfig};

/// The four free-form descriptive fields of a brief. Used both as the
/// input and the output of [`translate_brief`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub business_idea: String,
    pub target_audience: String,
    pub primary_goal: String,
    #[serde(default)]
    pub extra_notes: String,
}

/// Translate the descriptive fields of a brief to English.
///
/// The model is told to reply with a single JSON object carrying exactly
/// the four [`Brief`] string fields. Tone, color and language are either
/// enumerated or structural and are not part of the contract.
pub async fn translate_brief(
    client: &GeminiClient,
    model: &str,
    brief: &Brief,
) -> Result<Brief, EngineError> {
    let instruction = "\
You translate product briefs to English.
Reply with a single JSON object with exactly these string fields:
businessIdea, targetAudience, primaryGoal, extraNotes.
Fields already in English are returned unchanged. No prose, no code fences.";

    let payload = serde_json::to_string(brief)?;
    let raw = assist_call(client, model, instruction, &payload).await?;
    let brief: Brief = serde_json::from_str(strip_code_fences(&raw))?;
    Ok(brief)
}

/// Suggest page sections for a business idea.
///
/// The reply contract is a JSON array of short strings, written in the
/// same language the idea is written in.
pub async fn recommend_sections(
    client: &GeminiClient,
    model: &str,
    business_idea: &str,
) -> Result<Vec<String>, EngineError> {
    let instruction = "\
You recommend landing page sections for a business idea.
Reply with a JSON array of 4 to 6 short section names (e.g. \"Pricing\",
\"FAQ\"), written in the same language as the idea. No prose, no code
fences.";

    let raw = assist_call(client, model, instruction, business_idea).await?;
    let sections: Vec<String> = serde_json::from_str(strip_code_fences(&raw))?;
    debug!("recommended {} sections", sections.len());
    Ok(sections)
}

/// One low-temperature completion with the JSON MIME type requested.
/// An empty reply is an [`EngineError::EmptyResponse`], as for the main
/// call.
async fn assist_call(
    client: &GeminiClient,
    model: &str,
    instruction: &str,
    user_text: &str,
) -> Result<String, EngineError> {
    let body = GenerateContentRequest {
        system_instruction: Some(Content::bare(instruction)),
        contents: vec![Content::user(user_text)],
        generation_config: Some(GenerationConfig {
            temperature: Some(ASSIST_TEMPERATURE),
            response_mime_type: Some("application/json".to_string()),
        }),
    };

    let raw = client.generate_content(model, &body).await?;
    if raw.trim().is_empty() {
        return Err(EngineError::EmptyResponse);
    }
    Ok(raw)
}

/// Remove a wrapping markdown code fence, if present. Models asked for
/// bare JSON still fence it often enough that decoding without this step
/// would fail spuriously.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brief_round_trips_camel_case() {
        let json = r#"{
            "businessIdea": "Une application de tâches",
            "targetAudience": "freelances",
            "primaryGoal": "inscriptions"
        }"#;
        let brief: Brief = serde_json::from_str(json).unwrap();
        assert_eq!(brief.business_idea, "Une application de tâches");
        assert_eq!(brief.extra_notes, "");

        let out = serde_json::to_value(&brief).unwrap();
        assert!(out.get("businessIdea").is_some());
        assert!(out.get("business_idea").is_none());
    }

    #[test]
    fn fences_stripped_before_decode() {
        assert_eq!(strip_code_fences("```json\n[\"Pricing\"]\n```"), "[\"Pricing\"]");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  [\"FAQ\"]  "), "[\"FAQ\"]");
    }

    #[test]
    fn fenced_array_decodes() {
        let raw = "```json\n[\"Pricing\", \"FAQ\", \"Testimonials\"]\n```";
        let sections: Vec<String> = serde_json::from_str(strip_code_fences(raw)).unwrap();
        assert_eq!(sections, vec!["Pricing", "FAQ", "Testimonials"]);
    }

    #[test]
    fn malformed_reply_is_a_decode_error() {
        let raw = "I would suggest a pricing section.";
        let err = serde_json::from_str::<Vec<String>>(strip_code_fences(raw))
            .map_err(EngineError::from)
            .unwrap_err();
        assert!(matches!(err, EngineError::Decode(_)));
    }
}
