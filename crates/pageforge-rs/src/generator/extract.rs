//! Section recovery with layered fallbacks.
//!
//! The model is instructed to emit `=== NAME ===` headers; this module
//! gets back whatever the model actually wrote and recovers one body per
//! declared marker. Recovery is a ladder:
//!
//! 1. decorated pass — the full marker, case-insensitive, internal
//!    whitespace variation tolerated, bounded by the next declared marker
//!    or the end of the text;
//! 2. loose pass — the bare label (`PREVIEW` instead of
//!    `=== PREVIEW ===`), bounded by the next bare label, for a model
//!    that dropped the decoration but kept the name;
//! 3. fallback content — placeholder material per section, so the result
//!    handed to the caller is never empty.
//!
//! Markers are fixed literals owned by this crate, but they are escaped
//! before compilation anyway; a marker containing `.` or `*` matches as a
//! substring, never as a pattern. Duplicated markers are bounded by the
//! first occurrence only — text after a later duplicate is not recovered
//! into the field. That is a documented limitation kept deliberately:
//! scanning for the last occurrence could silently pull drift from a
//! malformed response into the result.

use regex::Regex;
use tracing::warn;

use super::GenerationResult;
use super::prompt::SECTION_MARKERS;
use crate::error::EngineError;

// ── Fallback content ───────────────────────────────────────────────

/// Substituted for a preview section that could not be located: a minimal
/// self-contained fragment that signals partial synthesis and points the
/// user at the Code tab.
pub const PREVIEW_FALLBACK: &str = r##"<main class="min-h-screen flex items-center justify-center p-8 bg-slate-50 dark:bg-slate-950">
  <div class="max-w-md text-center space-y-6">
    <div class="w-16 h-16 bg-amber-100 dark:bg-amber-900/30 rounded-full flex items-center justify-center mx-auto">
      <i class="fas fa-triangle-exclamation text-amber-600"></i>
    </div>
    <h1 class="text-3xl font-heading font-extrabold text-slate-900 dark:text-white">Preview Partial</h1>
    <p class="text-slate-600 dark:text-slate-400">The architecture was synthesized, but the visual preview required manual repair. Please check the "Code" tab for full source.</p>
    <a href="#" class="inline-block px-8 py-4 bg-indigo-600 text-white rounded-xl font-bold">Try Refreshing</a>
  </div>
</main>"##;

/// Substituted for a strategy section that could not be located.
pub const STRATEGY_FALLBACK: &str =
    "Detailed strategy breakdown was not formatted correctly by the engine.";

/// Prepended to the full raw response when the code section could not be
/// located, so no information is silently lost.
pub const CODE_FALLBACK_PREFIX: &str =
    "/* Source code extraction failed. Please check the full response below: */\n\n";

// ── Extraction ─────────────────────────────────────────────────────

/// Recover the three tab bodies from a raw completion.
///
/// Fails only with [`EngineError::EmptyResponse`] when the text is empty
/// or whitespace; every other degradation is absorbed into fallback
/// content. Pure function — calling it twice on the same text yields
/// identical results.
pub fn extract_sections(raw: &str) -> Result<GenerationResult, EngineError> {
    if raw.trim().is_empty() {
        return Err(EngineError::EmptyResponse);
    }

    let mut bodies = extract_bodies(raw, &SECTION_MARKERS).into_iter();
    let preview = bodies.next().unwrap_or_default();
    let strategy = bodies.next().unwrap_or_default();
    let code = bodies.next().unwrap_or_default();

    let preview_html = if preview.is_empty() {
        warn!("preview section not found, substituting fallback fragment");
        PREVIEW_FALLBACK.to_string()
    } else {
        preview
    };

    let strategy = if strategy.is_empty() {
        warn!("strategy section not found, substituting placeholder");
        STRATEGY_FALLBACK.to_string()
    } else {
        strategy
    };

    let code = if code.is_empty() {
        warn!("code section not found, preserving full raw response");
        format!("{CODE_FALLBACK_PREFIX}{raw}")
    } else {
        code
    };

    Ok(GenerationResult {
        preview_html,
        strategy,
        code,
    })
}

/// Recover one trimmed body per marker, in declared order, applying the
/// decorated and loose passes. Bodies the ladder could not fill come back
/// empty; substituting content for them is the caller's concern.
///
/// Each section is bounded by the next marker in the list, or the end of
/// the text for the last one.
pub fn extract_bodies(raw: &str, markers: &[&str]) -> Vec<String> {
    markers
        .iter()
        .enumerate()
        .map(|(i, &marker)| {
            let next = markers.get(i + 1).copied();
            let body = extract_block(raw, marker, next);
            if !body.is_empty() {
                return body;
            }
            // Loose pass: the model dropped the decoration but kept the
            // label.
            extract_block(raw, bare_label(marker), next.map(bare_label))
        })
        .collect()
}

/// Strip the `=== ... ===` decoration from a marker, leaving the label.
fn bare_label(marker: &str) -> &str {
    marker.trim_matches(|c: char| c == '=' || c.is_whitespace())
}

/// Extract the trimmed text between `marker` and `next` (or the end of
/// the text). Case-insensitive, non-greedy, first occurrence wins. The
/// markers are matched as literals with internal whitespace variation
/// tolerated.
fn extract_block(text: &str, marker: &str, next: Option<&str>) -> String {
    let pattern = match next {
        Some(n) => format!(
            r"(?is){}\s*(.*?)(?:{}|$)",
            literal_pattern(marker),
            literal_pattern(n)
        ),
        None => format!(r"(?is){}\s*(.*)$", literal_pattern(marker)),
    };

    // The pattern is assembled from escaped literals and fixed syntax, so
    // compilation cannot fail; an empty body is the miss signal either way.
    let Ok(re) = Regex::new(&pattern) else {
        return String::new();
    };

    re.captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Turn a marker into a pattern that matches it literally, tolerating
/// whitespace variation between its tokens. Every token goes through
/// `regex::escape` so pattern metacharacters in a marker have no effect.
fn literal_pattern(marker: &str) -> String {
    marker
        .split_whitespace()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join(r"\s*")
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
=== PREVIEW ===
<main class=\"hero\">Landing</main>

=== STRATEGY ===
Target freelancers with a signup-first hero.

=== CODE ===
```html
<!DOCTYPE html>
```";

    #[test]
    fn well_formed_response_yields_trimmed_bodies() {
        let result = extract_sections(WELL_FORMED).unwrap();
        assert_eq!(result.preview_html, "<main class=\"hero\">Landing</main>");
        assert_eq!(
            result.strategy,
            "Target freelancers with a signup-first hero."
        );
        assert_eq!(result.code, "```html\n<!DOCTYPE html>\n```");
        // No marker text leaks into any body.
        assert!(!result.preview_html.contains("==="));
        assert!(!result.strategy.contains("CODE"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let first = extract_sections(WELL_FORMED).unwrap();
        let second = extract_sections(WELL_FORMED).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn marker_case_and_spacing_variations_match() {
        let raw = "\
===  preview  ===
<main>A</main>
=== Strategy ===
plan
===CODE===
source";
        let result = extract_sections(raw).unwrap();
        assert_eq!(result.preview_html, "<main>A</main>");
        assert_eq!(result.strategy, "plan");
        assert_eq!(result.code, "source");
    }

    #[test]
    fn loose_labels_recovered_when_decoration_dropped() {
        let raw = "\
PREVIEW
<main>B</main>
STRATEGY
loose plan
CODE
loose source";
        let result = extract_sections(raw).unwrap();
        assert_eq!(result.preview_html, "<main>B</main>");
        assert_eq!(result.strategy, "loose plan");
        assert_eq!(result.code, "loose source");
    }

    #[test]
    fn missing_code_section_preserves_raw_text() {
        let raw = "\
=== PREVIEW ===
<main>C</main>
=== STRATEGY ===
plan only";
        let result = extract_sections(raw).unwrap();
        assert!(result.code.starts_with(CODE_FALLBACK_PREFIX));
        assert!(result.code.ends_with(raw));
    }

    #[test]
    fn markerless_refusal_hits_every_fallback() {
        let raw = "Sorry, I cannot help.";
        let result = extract_sections(raw).unwrap();
        assert_eq!(result.preview_html, PREVIEW_FALLBACK);
        assert_eq!(result.strategy, STRATEGY_FALLBACK);
        assert_eq!(
            result.code,
            format!("{CODE_FALLBACK_PREFIX}Sorry, I cannot help.")
        );
        // The never-empty invariant holds even here.
        assert!(!result.preview_html.is_empty());
        assert!(!result.strategy.is_empty());
        assert!(!result.code.is_empty());
    }

    #[test]
    fn empty_and_whitespace_responses_are_errors() {
        assert!(matches!(
            extract_sections(""),
            Err(EngineError::EmptyResponse)
        ));
        assert!(matches!(
            extract_sections("   \n\t  "),
            Err(EngineError::EmptyResponse)
        ));
    }

    #[test]
    fn duplicated_marker_first_occurrence_wins() {
        let raw = "\
=== PREVIEW ===
first body
=== STRATEGY ===
plan
=== PREVIEW ===
drift after a duplicate
=== CODE ===
source";
        let result = extract_sections(raw).unwrap();
        assert_eq!(result.preview_html, "first body");
        assert!(!result.preview_html.contains("drift"));
    }

    #[test]
    fn metacharacter_markers_match_as_literals() {
        let raw = "*.SECTION.* body here *.NEXT.* tail";
        let bodies = extract_bodies(raw, &["*.SECTION.*", "*.NEXT.*"]);
        assert_eq!(bodies[0], "body here");
        assert_eq!(bodies[1], "tail");
    }

    #[test]
    fn missing_next_marker_captures_to_end() {
        let raw = "=== PREVIEW ===\neverything that follows";
        let bodies = extract_bodies(raw, &SECTION_MARKERS);
        assert_eq!(bodies[0], "everything that follows");
        assert!(bodies[1].is_empty());
        assert!(bodies[2].is_empty());
    }

    #[test]
    fn preview_fallback_is_a_self_contained_fragment() {
        assert!(PREVIEW_FALLBACK.starts_with("<main"));
        assert!(PREVIEW_FALLBACK.ends_with("</main>"));
        // The fragment keeps its placeholder link and points the user at
        // the Code tab.
        assert!(PREVIEW_FALLBACK.contains(r##"href="#""##));
        assert!(PREVIEW_FALLBACK.contains("\"Code\" tab"));
    }

    #[test]
    fn bare_label_strips_decoration_only() {
        assert_eq!(bare_label("=== PREVIEW ==="), "PREVIEW");
        assert_eq!(bare_label("PREVIEW"), "PREVIEW");
    }
}
