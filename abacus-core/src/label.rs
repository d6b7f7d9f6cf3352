//! # Token Labeling
//!
//! Walks the whitespace-delimited words of a cleaned, marker-annotated
//! sermon and assigns each one a BIO tag, stripping the `<PERSON>` /
//! `<LOCATION>` markers from the surface text as it goes.
//!
//! The pass is strictly single-pass and order-sensitive: whether a word is
//! inside a multi-token entity depends on the markers seen on *earlier*
//! words. That state lives in a [`SpanTracker`] created fresh for every
//! document, so nothing can leak from one sermon into the next.

use crate::tag::{BioTag, EntityKind, LabeledToken};

const PERSON_OPEN: &str = "<PERSON>";
const PERSON_CLOSE: &str = "</PERSON>";
const LOCATION_OPEN: &str = "<LOCATION>";
const LOCATION_CLOSE: &str = "</LOCATION>";

/// Tracks the entity span currently open across tokens of one document.
///
/// Both flags start out false and must never be shared between documents.
#[derive(Debug, Default)]
pub struct SpanTracker {
    inside_person: bool,
    inside_location: bool,
}

impl SpanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels a single raw word and updates the open-span state.
    ///
    /// The person rules are checked before the location rules, so a token
    /// can never be inside both kinds at once. A single-token entity (both
    /// markers on the same word) gets only a `B-` tag.
    pub fn label_token(&mut self, word: &str) -> LabeledToken {
        if word.starts_with(PERSON_OPEN) {
            if !word.ends_with(PERSON_CLOSE) {
                self.inside_person = true;
            }
            return LabeledToken::new(
                word.replace(PERSON_OPEN, "").replace(PERSON_CLOSE, ""),
                BioTag::Begin(EntityKind::Person),
            );
        } else if word.ends_with(PERSON_CLOSE) {
            self.inside_person = false;
            return LabeledToken::new(
                word.replace(PERSON_CLOSE, ""),
                BioTag::Inside(EntityKind::Person),
            );
        } else if self.inside_person {
            return LabeledToken::new(word, BioTag::Inside(EntityKind::Person));
        }

        if word.starts_with(LOCATION_OPEN) {
            if !word.ends_with(LOCATION_CLOSE) {
                self.inside_location = true;
            }
            LabeledToken::new(
                word.replace(LOCATION_OPEN, "").replace(LOCATION_CLOSE, ""),
                BioTag::Begin(EntityKind::Location),
            )
        } else if word.ends_with(LOCATION_CLOSE) {
            self.inside_location = false;
            LabeledToken::new(
                word.replace(LOCATION_CLOSE, ""),
                BioTag::Inside(EntityKind::Location),
            )
        } else if self.inside_location {
            LabeledToken::new(word, BioTag::Inside(EntityKind::Location))
        } else {
            LabeledToken::new(word, BioTag::Outside)
        }
    }
}

/// Labels a whole cleaned document: one [`LabeledToken`] per
/// whitespace-delimited word, with a fresh [`SpanTracker`].
pub fn label_document(text: &str) -> Vec<LabeledToken> {
    let mut tracker = SpanTracker::new();
    text.split_whitespace()
        .map(|word| tracker.label_token(word))
        .collect()
}
