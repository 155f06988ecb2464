//! Convenience re-exports for common `pageforge-rs` types.
//!
//! Meant to be glob-imported by collaborator code:
//!
//! ```ignore
//! use pageforge_rs::prelude::*;
//! ```
//!
//! This pulls in the client, the request/result pair, the `generate`
//! entry point, the auxiliary calls and the error type. Lower-level
//! pieces (wire DTOs, marker constants, the extraction helpers) are
//! intentionally excluded — import those from their modules directly
//! when needed.

// ── Client and entry point ──────────────────────────────────────────
pub use crate::generator::{GenerationRequest, GenerationResult, generate};
pub use crate::{DEFAULT_MODEL, GeminiClient};

// ── Auxiliary calls ─────────────────────────────────────────────────
pub use crate::generator::assist::{Brief, recommend_sections, translate_brief};

// ── Errors ──────────────────────────────────────────────────────────
pub use crate::error::EngineError;
