//! End-to-end scoring tests
//!
//! These walk the full pipeline (normalize, matrix, backtrace, report) for
//! the scenarios the rest of the app depends on, plus the structural
//! invariants of the alignment itself.

use recital::alignment::{align, edit_distance_matrix};
use recital::normalize::{normalize, tokenize};
use recital::report::score_transcript;

fn distance(reference: &str, hypothesis: &str) -> usize {
    let ref_words = tokenize(reference);
    let hyp_words = tokenize(hypothesis);
    let matrix = edit_distance_matrix(&ref_words, &hyp_words);
    matrix[ref_words.len()][hyp_words.len()]
}

// ============ Concrete scenarios ============

#[test]
fn test_perfect_transcript() {
    let report = score_transcript("the cat sat", "the cat sat").unwrap();

    assert_eq!(report.summary, "total errors = 0, total words = 3, wer = 0.00");
    assert_eq!(
        report.details,
        "error breakdown: del = 0.00, ins = 0.00, sub = 0.00"
    );
    assert_eq!(report.html, "the cat sat ");
}

#[test]
fn test_single_substitution() {
    let report = score_transcript("a cat sat", "the cat sat").unwrap();

    assert_eq!(report.summary, "total errors = 1, total words = 3, wer = 33.33");
    assert_eq!(
        report.details,
        "error breakdown: del = 0.00, ins = 0.00, sub = 33.33"
    );
    assert!(report.html.contains("<del>a</del>"));
    assert!(report.html.contains(">the</span>"));
}

#[test]
fn test_single_deletion() {
    let report = score_transcript("the cat", "the cat sat").unwrap();

    assert_eq!(report.summary, "total errors = 1, total words = 3, wer = 33.33");
    assert_eq!(
        report.details,
        "error breakdown: del = 33.33, ins = 0.00, sub = 0.00"
    );
    assert!(report.html.contains(">sat</span>"));
}

#[test]
fn test_single_insertion() {
    let report = score_transcript("the cat sat down", "the cat sat").unwrap();

    // percentage is over the reference word count, not the hypothesis
    assert_eq!(report.summary, "total errors = 1, total words = 3, wer = 33.33");
    assert_eq!(
        report.details,
        "error breakdown: del = 0.00, ins = 33.33, sub = 0.00"
    );
    assert!(report.html.contains("<del>down</del>"));
}

#[test]
fn test_both_blank() {
    let report = score_transcript("", "").unwrap();

    assert_eq!(report.summary, "total errors = 0, total words = 0, wer = 0.00");
    assert!(report.html.is_empty());
}

#[test]
fn test_tie_break_insertion() {
    // several minimal edit paths exist; the fixed backtrace order must pick
    // the insertion of "big"
    let report = score_transcript("the big cat", "the cat").unwrap();

    assert_eq!(report.summary, "total errors = 1, total words = 2, wer = 50.00");
    assert_eq!(
        report.details,
        "error breakdown: del = 0.00, ins = 50.00, sub = 0.00"
    );
    assert!(report.html.contains("<del>big</del>"));
}

// ============ Normalization through the full pipeline ============

#[test]
fn test_punctuation_and_case_never_count_as_errors() {
    let report = score_transcript("The cat sat!", "the cat, sat.").unwrap();
    assert_eq!(report.summary, "total errors = 0, total words = 3, wer = 0.00");
}

#[test]
fn test_annotations_are_stripped_before_scoring() {
    let report = score_transcript("the cat sat", "the cat [pauses] sat").unwrap();
    assert_eq!(report.summary, "total errors = 0, total words = 3, wer = 0.00");
}

#[test]
fn test_blank_reference_counts_all_hypothesis_words_as_insertions() {
    let report = score_transcript("the cat sat", "").unwrap();

    // WER divisor is clamped, so three insertions against zero reference
    // words read as 300%
    assert_eq!(report.summary, "total errors = 3, total words = 0, wer = 300.00");
}

// ============ Structural invariants ============

#[test]
fn test_self_alignment_is_all_matches() {
    let sentences = [
        "the quick brown fox",
        "one",
        "a b c d e f g",
        "repeated repeated repeated",
    ];

    for sentence in sentences {
        assert_eq!(distance(sentence, sentence), 0);

        let alignment = align(sentence, sentence).unwrap();
        assert!(alignment.ops.iter().all(|op| !op.kind.is_error()));
    }
}

#[test]
fn test_distance_bounded_by_combined_length() {
    let pairs = [
        ("the quick brown fox", "a completely different sentence here"),
        ("short", "a much longer hypothesis than the reference was"),
        ("", "anything at all"),
        ("something", ""),
    ];

    for (reference, hypothesis) in pairs {
        let bound = tokenize(reference).len() + tokenize(hypothesis).len();
        assert!(distance(reference, hypothesis) <= bound);
    }
}

#[test]
fn test_adjacent_cells_differ_by_at_most_one() {
    let ref_words = tokenize("the cat sat on the mat");
    let hyp_words = tokenize("a bat sat down");
    let matrix = edit_distance_matrix(&ref_words, &hyp_words);

    for i in 0..matrix.len() {
        for j in 1..matrix[i].len() {
            assert!(matrix[i][j].abs_diff(matrix[i][j - 1]) <= 1);
            if i > 0 {
                assert!(matrix[i][j].abs_diff(matrix[i - 1][j]) <= 1);
            }
        }
    }
}

#[test]
fn test_classified_errors_equal_edit_distance() {
    let pairs = [
        ("the cat sat on the mat", "the bat sat on a mat quickly"),
        ("to be or not to be", "to be or to not be"),
        ("four score and seven years ago", "for score in several years"),
        ("", ""),
        ("lone", "lone word extra"),
    ];

    for (reference, hypothesis) in pairs {
        let alignment = align(reference, hypothesis).unwrap();
        assert_eq!(
            alignment.counts.total(),
            distance(reference, hypothesis),
            "drift for ({reference:?}, {hypothesis:?})"
        );
    }
}

#[test]
fn test_fragment_per_operation_in_order() {
    let reference = "the cat sat on the mat";
    let hypothesis = "a cat sat on mat today";

    let alignment = align(&normalize(reference), &normalize(hypothesis)).unwrap();
    let report = score_transcript(hypothesis, reference).unwrap();

    // every non-empty reference word appears in the html in reference order
    let mut rest = report.html.as_str();
    for op in alignment.ops.iter().filter(|op| !op.reference.is_empty()) {
        let at = rest
            .find(op.reference.as_str())
            .unwrap_or_else(|| panic!("{} missing or out of order", op.reference));
        rest = &rest[at..];
    }
}
