//! WER statistics and annotated diff rendering
//!
//! Turns an [`Alignment`] into the `{summary, details, html}` shape the UI
//! consumes. The HTML diff keeps a strict 1:1 correspondence between edit
//! operations and markup fragments, in sequence order.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::alignment::{Alignment, EditKind, ErrorCounts, align};
use crate::error::{Error, Result};
use crate::normalize::normalize;

/// Scoring result for one hypothesis/reference pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WerReport {
    /// Total errors, reference word count, and WER
    pub summary: String,
    /// Per-category error breakdown
    pub details: String,
    /// Annotated diff; token text is already HTML-escaped
    pub html: String,
}

/// Word Error Rate as a percentage of the reference word count.
///
/// Can exceed 100.0 when insertions dominate. The divisor is clamped to 1
/// so an empty reference scores 0.0 rather than NaN.
pub fn word_error_rate(counts: &ErrorCounts) -> f64 {
    percentage(counts.total(), counts.reference_words)
}

fn percentage(part: usize, whole: usize) -> f64 {
    part as f64 * 100.0 / whole.max(1) as f64
}

fn summary_line(counts: &ErrorCounts) -> String {
    format!(
        "total errors = {}, total words = {}, wer = {:.2}",
        counts.total(),
        counts.reference_words,
        word_error_rate(counts)
    )
}

/// Per-category breakdown. Each percentage is computed independently
/// against the reference word count, so the three do not necessarily sum
/// to the overall rate when insertions dominate. Known quirk, kept to
/// match the established output format.
fn breakdown_line(counts: &ErrorCounts) -> String {
    format!(
        "error breakdown: del = {:.2}, ins = {:.2}, sub = {:.2}",
        percentage(counts.deletions, counts.reference_words),
        percentage(counts.insertions, counts.reference_words),
        percentage(counts.substitutions, counts.reference_words),
    )
}

fn escape_html(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for c in token.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the annotated diff, one fragment per edit operation.
///
/// Matches show the shared word as plain text; substitutions show the
/// hypothesis word struck out beside the reference word, both highlighted;
/// deletions highlight the missing reference word; insertions strike out
/// the extra hypothesis word. Tokens are HTML-escaped here, so the output
/// is safe to inject directly. A match operation whose words differ is an
/// invariant violation.
pub fn render_html(alignment: &Alignment) -> Result<String> {
    let mut html = String::new();

    for op in &alignment.ops {
        match op.kind {
            EditKind::Match => {
                if op.hypothesis != op.reference {
                    error!(
                        hypothesis = %op.hypothesis,
                        reference = %op.reference,
                        "match operation pairs unequal words"
                    );
                    return Err(Error::InvariantViolation(format!(
                        "match pairs unequal words {:?} and {:?}",
                        op.hypothesis, op.reference
                    )));
                }
                html.push_str(&escape_html(&op.reference));
                html.push(' ');
            }
            EditKind::Substitution => {
                html.push_str(&format!(
                    "<span style=\"background-color: yellow\"><del>{}</del></span> \
                     <span style=\"background-color: yellow\">{}</span> ",
                    escape_html(&op.hypothesis),
                    escape_html(&op.reference)
                ));
            }
            EditKind::Deletion => {
                html.push_str(&format!(
                    "<span style=\"background-color: red\">{}</span> ",
                    escape_html(&op.reference)
                ));
            }
            EditKind::Insertion => {
                html.push_str(&format!(
                    "<span style=\"background-color: green\"><del>{}</del></span> ",
                    escape_html(&op.hypothesis)
                ));
            }
        }
    }

    Ok(html)
}

/// Score a recognizer hypothesis against a reference transcript.
///
/// Both inputs pass through [`normalize`] first, so casing, stray
/// punctuation, and bracketed annotations never count as errors. Either
/// input may be blank.
pub fn score_transcript(hypothesis: &str, reference: &str) -> Result<WerReport> {
    let hypothesis = normalize(hypothesis);
    let reference = normalize(reference);

    let alignment = align(&reference, &hypothesis)?;

    Ok(WerReport {
        summary: summary_line(&alignment.counts),
        details: breakdown_line(&alignment.counts),
        html: render_html(&alignment)?,
    })
}
