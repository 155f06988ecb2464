//! REST API endpoint handlers.
//!
//! The browser form posts a brief and renders the three-field result; the
//! failure surface is deliberately small. Per the propagation policy of
//! the core, only a missing response or a failed upstream call becomes an
//! error status here — a response that merely ignored the structure
//! contract still arrives as 200 with placeholder content in the result.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use pageforge_rs::generator::assist::{Brief, recommend_sections, translate_brief};
use pageforge_rs::generator::{GenerationRequest, GenerationResult, generate};
use pageforge_rs::{EngineError, GeminiClient};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Shared application state passed to all handlers via axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<GeminiClient>,
    pub model: String,
}

/// Error payload for every non-2xx API response: one human-readable
/// message, no parser state, no stack traces.
#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiFailure = (StatusCode, Json<ErrorBody>);

fn validation_failure(missing: &[&str]) -> ApiFailure {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: format!("missing required fields: {}", missing.join(", ")),
        }),
    )
}

/// Map an engine failure to a status + message. The full cause chain goes
/// to the logs; the client gets the display string only. Transport
/// failures are 503 so the browser knows a retry may help.
fn engine_failure(err: EngineError) -> ApiFailure {
    error!("engine call failed: {err:?}");
    let status = if err.is_transient() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::BAD_GATEWAY
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

/// GET /api/health — liveness probe. Returns 204.
pub async fn get_health() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// POST /api/generate — run one generation.
///
/// Returns 200 with a `GenerationResult` whose three fields are never
/// empty, 422 when a required brief field is blank, or 502/503 when the
/// engine produced nothing usable.
pub async fn post_generate(
    State(app): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResult>, ApiFailure> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(validation_failure(&missing));
    }

    let result = generate(&app.client, &app.model, &request)
        .await
        .map_err(engine_failure)?;
    Ok(Json(result))
}

/// POST /api/translate — translate the descriptive brief fields to
/// English. Body and response are both a `Brief`.
pub async fn post_translate(
    State(app): State<AppState>,
    Json(brief): Json<Brief>,
) -> Result<Json<Brief>, ApiFailure> {
    let translated = translate_brief(&app.client, &app.model, &brief)
        .await
        .map_err(engine_failure)?;
    Ok(Json(translated))
}

/// Request body for POST /api/recommend.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub business_idea: String,
}

/// POST /api/recommend — suggest page sections for a business idea.
/// Returns a JSON array of short strings in the idea's language.
pub async fn post_recommend(
    State(app): State<AppState>,
    Json(body): Json<RecommendRequest>,
) -> Result<Json<Vec<String>>, ApiFailure> {
    if body.business_idea.trim().is_empty() {
        return Err(validation_failure(&["businessIdea"]));
    }

    let sections = recommend_sections(&app.client, &app.model, &body.business_idea)
        .await
        .map_err(engine_failure)?;
    Ok(Json(sections))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_request_deserializes() {
        let json = r#"{"businessIdea": "A task app"}"#;
        let req: RecommendRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.business_idea, "A task app");
    }

    #[test]
    fn validation_failure_names_fields() {
        let (status, Json(body)) = validation_failure(&["businessIdea", "primaryGoal"]);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body.error,
            "missing required fields: businessIdea, primaryGoal"
        );
    }

    // The transport→503 branch needs a real reqwest::Error and is covered
    // by the unreachable-engine integration test.
    #[test]
    fn engine_failures_map_to_bad_gateway() {
        let (status, _) = engine_failure(EngineError::EmptyResponse);
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = engine_failure(EngineError::Upstream {
            message: "quota exceeded".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
