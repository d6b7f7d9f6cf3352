//! # Generic BIO Encoding and Validation
//!
//! Two independent helpers around the BIO scheme:
//!
//! - [`transform_to_bio`] turns a stream of *bare* category names
//!   ("PER", "LOC", "O") interspersed with sentence boundaries into proper
//!   B-/I- prefixed labels.
//! - [`check_bio_validity`] structurally validates CoNLL-style lines and
//!   reports the indices of every malformed line instead of failing.

use crate::tag::SequenceItem;
use regex::Regex;
use std::sync::LazyLock;

/// Prefixes a stream of bare category labels with B-/I-.
///
/// A category gets `B-` when it differs from the immediately preceding
/// string element and `I-` when it repeats it. The literal category "O" is
/// emitted as-is, never prefixed (but still counts as the previous
/// element). Sentence boundaries pass through unchanged and do **not**
/// clear the previous-category state; an entity is allowed to be read as
/// continuing across a boundary by the consumer.
pub fn transform_to_bio(values: &[SequenceItem]) -> Vec<SequenceItem> {
    let mut transformed = Vec::with_capacity(values.len());
    let mut previous: Option<&str> = None;

    for value in values {
        match value {
            SequenceItem::Value(label) => {
                if label == "O" {
                    transformed.push(SequenceItem::value("O"));
                } else if previous != Some(label.as_str()) {
                    transformed.push(SequenceItem::value(format!("B-{label}")));
                } else {
                    transformed.push(SequenceItem::value(format!("I-{label}")));
                }
                previous = Some(label.as_str());
            }
            SequenceItem::Break => transformed.push(SequenceItem::Break),
        }
    }

    transformed
}

/// Result of a structural BIO check: overall verdict plus the indices of
/// every line that failed the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioReport {
    pub valid: bool,
    pub bad_lines: Vec<usize>,
}

static BIO_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+\t(B-PER|I-PER|B-LOC|I-LOC|O)|)$").unwrap());

/// Checks that every line is either empty (sentence boundary) or exactly
/// `<token>\t<label>` with a label from the five-tag vocabulary.
///
/// Malformed input is reported, never raised: the caller decides whether a
/// bad corpus aborts the run.
pub fn check_bio_validity<S: AsRef<str>>(lines: &[S]) -> BioReport {
    let bad_lines: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !BIO_LINE.is_match(line.as_ref()))
        .map(|(idx, _)| idx)
        .collect();
    BioReport {
        valid: bad_lines.is_empty(),
        bad_lines,
    }
}
