//! # BIO Tag Scheme and Entity Kinds
//!
//! Defines the **BIO** (Beginning-Inside-Outside) annotation scheme used to
//! label tokens of the sermon corpus.
//!
//! ## Entity Kinds
//!
//! | Prefix | Meaning            | Examples                         |
//! |--------|--------------------|----------------------------------|
//! | PER    | Person             | Abraham, Leopoldus, Maria        |
//! | LOC    | Location           | Wien, Oesterreich, Rom           |
//! | O      | Outside any entity | (every non-entity word)          |
//!
//! ## BIO scheme
//!
//! - `B-KIND`: Begin, first token of an entity span
//! - `I-KIND`: Inside, continuation tokens of the same span
//! - `O`: Outside, not part of any entity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity kinds annotated in the sermon transcripts.
///
/// The source markup only distinguishes person and place names, so the
/// whole tag vocabulary is these two kinds plus `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// **Person**: names of historical or biblical persons. E.g. "Leopoldus", "Maria Theresia".
    Person,
    /// **Location**: cities, regions, rivers. E.g. "Wien", "Donau".
    Location,
}

impl EntityKind {
    /// Category name as used in labels ("PER" / "LOC").
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Person => "PER",
            EntityKind::Location => "LOC",
        }
    }
}

/// A BIO tag assigned to a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BioTag {
    /// Not part of any entity.
    Outside,
    /// First token of an entity span.
    Begin(EntityKind),
    /// Continuation token of an entity span.
    Inside(EntityKind),
}

impl BioTag {
    /// The label string written to CoNLL files ("O", "B-PER", "I-LOC", ...).
    pub fn label(&self) -> &'static str {
        match self {
            BioTag::Outside => "O",
            BioTag::Begin(EntityKind::Person) => "B-PER",
            BioTag::Begin(EntityKind::Location) => "B-LOC",
            BioTag::Inside(EntityKind::Person) => "I-PER",
            BioTag::Inside(EntityKind::Location) => "I-LOC",
        }
    }

    /// Parses a label string back into a tag. Returns `None` for anything
    /// outside the five-label vocabulary.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "O" => Some(BioTag::Outside),
            "B-PER" => Some(BioTag::Begin(EntityKind::Person)),
            "B-LOC" => Some(BioTag::Begin(EntityKind::Location)),
            "I-PER" => Some(BioTag::Inside(EntityKind::Person)),
            "I-LOC" => Some(BioTag::Inside(EntityKind::Location)),
            _ => None,
        }
    }

    /// True for `I-PER`/`I-LOC`, i.e. a tag that must not be separated from
    /// the token before it.
    pub fn is_continuation(&self) -> bool {
        matches!(self, BioTag::Inside(_))
    }
}

impl fmt::Display for BioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A token together with its BIO tag.
///
/// The atomic unit of the prepared corpus: one whitespace-delimited word of
/// the cleaned text, stripped of entity markers, plus its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledToken {
    /// Surface text of the token (markers already removed).
    pub text: String,
    /// The assigned BIO tag.
    pub tag: BioTag,
}

impl LabeledToken {
    pub fn new(text: impl Into<String>, tag: BioTag) -> Self {
        Self { text: text.into(), tag }
    }
}

/// An element of a per-document sequence: either a string value (a token or
/// a bare category label, depending on the consumer) or a sentence boundary.
///
/// The boundary is a sentinel, never labeled and never counted as a token.
/// It separates one sentence's elements from the next inside a flat stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceItem {
    /// A string element.
    Value(String),
    /// Sentence boundary sentinel.
    Break,
}

impl SequenceItem {
    pub fn value(s: impl Into<String>) -> Self {
        SequenceItem::Value(s.into())
    }
}
