//! Prompt construction: the output-structure contract and the task brief.
//!
//! Two artifacts come out of here, both pure string composition with no
//! side effects: [`build_instruction`] (the standing contract the model
//! must honor — section markers, output language, coverage and no-omission
//! policy) and [`build_prompt`] (the concrete brief the contract applies
//! to). The markers declared here are the sole structural agreement with
//! the model; [`super::extract`] searches for them in the same order.

use super::GenerationRequest;

// ── Section markers ────────────────────────────────────────────────

pub const PREVIEW_MARKER: &str = "=== PREVIEW ===";
pub const STRATEGY_MARKER: &str = "=== STRATEGY ===";
pub const CODE_MARKER: &str = "=== CODE ===";

/// Declared section order. Extraction walks this list and bounds each
/// section by the next marker in it.
pub const SECTION_MARKERS: [&str; 3] = [PREVIEW_MARKER, STRATEGY_MARKER, CODE_MARKER];

// ── Builders ───────────────────────────────────────────────────────

/// Build the system/style instruction for a request.
///
/// The instruction states the ordered marker list verbatim (each on its
/// own line, no markdown decoration), directs all user-facing copy into
/// the request's target language, requires every section enumerated in
/// the notes to appear, and prefers a degraded-but-complete output over
/// omission.
pub fn build_instruction(request: &GenerationRequest) -> String {
    let notes_rule = if request.notes().is_empty() {
        String::new()
    } else {
        "Every page section listed under Notes in the briefing MUST be represented in the output.\n"
            .to_string()
    };

    format!(
        "\
ROLE: AI Landing Page Architect.

You are generating content for a system with a strict regex-based text parser.
The headers MUST be exactly as shown below, on their own lines, with no markdown (like # or *) preceding them.

OUTPUT STRUCTURE CONTRACT (MANDATORY)

You must include ALL three sections in this exact order:

{PREVIEW_MARKER}
[Provide RAW HTML here. Start with <main> and end with </main>. Use Tailwind classes. No markdown blocks.]

{STRATEGY_MARKER}
[Provide marketing strategy, value prop, and audience details in plain text.]

{CODE_MARKER}
[Provide the full production source code (index.html, script.js, etc.) using standard markdown code blocks.]

LANGUAGE

All user-facing textual content in the output MUST be written in {language}, regardless of the language the briefing fields are written in.

DESIGN CONSTRAINTS

- Style: Modern SaaS (inspired by Linear, Vercel, Framer).
- Dark/Light mode: Support both using Tailwind's 'dark' class or CSS variables.
- Accent color: {accent}.
- Typography: Headings: Plus Jakarta Sans; Body: Inter.
- Animation: Subtle entrance animations (CSS or simple JS).

IMPORTANT:
Do not write anything outside of these three blocks.
Never leave a section empty.
{notes_rule}If you are struggling, provide a simplified high-quality fallback rather than an error.",
        language = request.language(),
        accent = request.accent_color(),
    )
}

/// Build the task prompt: the structured brief restated so the contract
/// has concrete subject matter to apply to.
///
/// User text goes in as-is — the prompt is plain text handed to an
/// external system, not a security boundary.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let notes = request.notes();
    format!(
        "\
Generate a landing page architecture for:
Business Idea: {idea}
Target Audience: {audience}
Primary Goal: {goal}
Tone & Style: {tone}
Accent Color: {accent}
Notes: {notes}",
        idea = request.business_idea,
        audience = request.target_audience,
        goal = request.primary_goal,
        tone = request.tone_style,
        accent = request.accent_color(),
        notes = if notes.is_empty() { "None" } else { notes },
    )
}
