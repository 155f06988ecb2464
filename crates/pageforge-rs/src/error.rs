//! Failure taxonomy for the generation engine.
//!
//! Only two conditions ever reach a user as an error: a completion with no
//! usable text ([`EngineError::EmptyResponse`]) and a failed upstream call
//! ([`EngineError::Upstream`] / [`EngineError::Transport`]). Missing or
//! malformed *sections* are not errors — they are absorbed by the fallback
//! ladder in [`crate::generator::extract`] and surfaced as placeholder
//! content inside a normally-structured result.
//!
//! Display strings are the single human-readable message shown to the UI
//! layer. Underlying causes stay attached as `source()` for logging.

use thiserror::Error;

/// Failure raised by the generation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine returned no usable text at all. No extraction is
    /// attempted in this case.
    #[error("the engine returned an empty response")]
    EmptyResponse,

    /// The API accepted the request but answered with an error payload
    /// (auth, quota, content policy). The upstream message is kept for
    /// logs and display.
    #[error("engine failure during synthesis: {message}")]
    Upstream { message: String },

    /// The HTTP call itself failed (network, TLS, timeout). Display stays
    /// generic; the reqwest cause is preserved as source.
    #[error("the engine could not be reached")]
    Transport(#[from] reqwest::Error),

    /// An auxiliary call promised JSON and returned something that does
    /// not parse as the expected shape.
    #[error("the engine returned malformed data")]
    Decode(#[from] serde_json::Error),
}

impl EngineError {
    /// Whether a caller could reasonably retry the same request.
    ///
    /// Transport failures are transient; everything else either needs a
    /// different request or a working upstream.
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_user_safe() {
        let err = EngineError::EmptyResponse;
        assert_eq!(err.to_string(), "the engine returned an empty response");

        let err = EngineError::Upstream {
            message: "quota exceeded".into(),
        };
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn decode_preserves_source() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = EngineError::from(parse_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_transient());
    }
}
