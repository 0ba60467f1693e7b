//! Word-level alignment between a hypothesis transcript and a reference
//!
//! Classic dynamic-programming edit distance over whole words, followed by a
//! backtrace that labels every position as a match, substitution, insertion,
//! or deletion. The backtrace tie-break order is fixed (substitution, then
//! deletion, then insertion) so the same input pair always produces the same
//! diff.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{Error, Result};
use crate::normalize::tokenize;

/// Classification of one aligned word pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// Hypothesis word equals the reference word
    Match,
    /// Hypothesis word replaces a different reference word
    Substitution,
    /// Hypothesis word with no reference counterpart
    Insertion,
    /// Reference word missing from the hypothesis
    Deletion,
}

impl EditKind {
    /// Single-character code, handy for compact edit vectors in logs
    pub fn as_char(&self) -> char {
        match self {
            Self::Match => 'M',
            Self::Substitution => 'S',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
        }
    }

    /// True for every kind except `Match`
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Match)
    }
}

/// A single step in the alignment, in left-to-right reading order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditOp {
    pub kind: EditKind,
    /// Hypothesis word, empty for deletions
    pub hypothesis: String,
    /// Reference word, empty for insertions
    pub reference: String,
}

/// Aggregate error counts for one hypothesis/reference pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCounts {
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
    /// Length of the reference word sequence
    pub reference_words: usize,
}

impl ErrorCounts {
    /// Total errors across all three categories
    pub fn total(&self) -> usize {
        self.substitutions + self.insertions + self.deletions
    }
}

/// Result of aligning a hypothesis against a reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alignment {
    /// All edit operations in original left-to-right order
    pub ops: Vec<EditOp>,
    pub counts: ErrorCounts,
}

impl Alignment {
    /// Edit vector string such as "MMSMD"
    pub fn edit_vector(&self) -> String {
        self.ops.iter().map(|op| op.kind.as_char()).collect()
    }
}

/// Build the (ref+1) x (hyp+1) edit-distance matrix.
///
/// `cell[i][j]` is the minimum number of single-word insert, delete, and
/// substitute operations turning the first `j` hypothesis words into the
/// first `i` reference words; `cell[R][H]` is the word edit distance.
pub fn edit_distance_matrix(ref_words: &[&str], hyp_words: &[&str]) -> Vec<Vec<usize>> {
    let rows = ref_words.len();
    let cols = hyp_words.len();

    let mut matrix = vec![vec![0usize; cols + 1]; rows + 1];

    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }

    for i in 1..=rows {
        for j in 1..=cols {
            matrix[i][j] = if ref_words[i - 1] == hyp_words[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                let substitute = matrix[i - 1][j - 1];
                let insert = matrix[i][j - 1];
                let delete = matrix[i - 1][j];
                1 + substitute.min(insert).min(delete)
            };
        }
    }

    matrix
}

/// Walk the matrix from `cell[R][H]` back to `cell[0][0]`, classifying one
/// edit operation per step.
///
/// Branch priority at each `(i, j)`: exact word match, then forced deletion
/// (`j == 0`), forced insertion (`i == 0`), substitution, deletion,
/// insertion. Ties between equal-cost paths are resolved by this order, so
/// the output is fully deterministic. Reaching no branch at all means the
/// matrix was not built by [`edit_distance_matrix`] for these sequences and
/// is reported as an invariant violation rather than a panic.
pub fn backtrace(
    matrix: &[Vec<usize>],
    ref_words: &[&str],
    hyp_words: &[&str],
) -> Result<Alignment> {
    let mut i = ref_words.len();
    let mut j = hyp_words.len();

    let mut ops = Vec::with_capacity(i.max(j));
    let mut counts = ErrorCounts {
        reference_words: ref_words.len(),
        ..Default::default()
    };

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && ref_words[i - 1] == hyp_words[j - 1] {
            i -= 1;
            j -= 1;
            ops.push(EditOp {
                kind: EditKind::Match,
                hypothesis: hyp_words[j].to_string(),
                reference: ref_words[i].to_string(),
            });
        } else if j == 0 {
            i -= 1;
            counts.deletions += 1;
            ops.push(EditOp {
                kind: EditKind::Deletion,
                hypothesis: String::new(),
                reference: ref_words[i].to_string(),
            });
        } else if i == 0 {
            j -= 1;
            counts.insertions += 1;
            ops.push(EditOp {
                kind: EditKind::Insertion,
                hypothesis: hyp_words[j].to_string(),
                reference: String::new(),
            });
        } else if matrix[i][j] == 1 + matrix[i - 1][j - 1] {
            i -= 1;
            j -= 1;
            counts.substitutions += 1;
            ops.push(EditOp {
                kind: EditKind::Substitution,
                hypothesis: hyp_words[j].to_string(),
                reference: ref_words[i].to_string(),
            });
        } else if matrix[i][j] == 1 + matrix[i - 1][j] {
            i -= 1;
            counts.deletions += 1;
            ops.push(EditOp {
                kind: EditKind::Deletion,
                hypothesis: String::new(),
                reference: ref_words[i].to_string(),
            });
        } else if matrix[i][j] == 1 + matrix[i][j - 1] {
            j -= 1;
            counts.insertions += 1;
            ops.push(EditOp {
                kind: EditKind::Insertion,
                hypothesis: hyp_words[j].to_string(),
                reference: String::new(),
            });
        } else {
            error!(
                reference = ?ref_words,
                hypothesis = ?hyp_words,
                rows = matrix.len(),
                cols = matrix.first().map_or(0, Vec::len),
                cell_i = i,
                cell_j = j,
                "backtrace reached a cell no edit step explains"
            );
            return Err(Error::InvariantViolation(format!(
                "no edit step explains matrix cell ({i}, {j})"
            )));
        }
    }

    ops.reverse();

    // The classified errors must account for the matrix corner exactly;
    // drift means the matrix and the backtrace disagree.
    let distance = matrix[ref_words.len()][hyp_words.len()];
    if counts.total() != distance {
        error!(
            reference = ?ref_words,
            hypothesis = ?hyp_words,
            distance,
            classified = counts.total(),
            "backtrace error count does not match edit distance"
        );
        return Err(Error::InvariantViolation(format!(
            "classified {} errors but edit distance is {distance}",
            counts.total()
        )));
    }

    Ok(Alignment { ops, counts })
}

/// Align two normalized transcripts and classify every discrepancy.
///
/// Inputs are tokenized on whitespace; callers wanting punctuation and case
/// folded away should pass text through [`crate::normalize::normalize`]
/// first.
pub fn align(reference: &str, hypothesis: &str) -> Result<Alignment> {
    let ref_words = tokenize(reference);
    let hyp_words = tokenize(hypothesis);

    let matrix = edit_distance_matrix(&ref_words, &hyp_words);
    backtrace(&matrix, &ref_words, &hyp_words)
}
