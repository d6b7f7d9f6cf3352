//! # abacus-core: Sermon Corpus Preparation for NER
//!
//! This crate turns raw, tag-annotated transcripts of historical sermons
//! (the ABaCus editions of Abraham a Sancta Clara) into a cleaned,
//! tokenized, BIO-labeled corpus for training a named-entity-recognition
//! model, and aligns model predictions back onto the source text.
//!
//! ## Pipeline
//!
//! The data flows through a linear pipeline, one transformation per stage:
//!
//! 1. **Markup normalization** ([`markup`]): every element of the edition
//!    markup except the person/place name spans is unwrapped; the
//!    survivors are renamed to `<PERSON>`/`<LOCATION>` pseudo-tags.
//! 2. **Cleanup** ([`clean`]): an ordered chain of rewrite rules strips
//!    transcription noise, repairs hyphenation and removes abbreviation
//!    dots, without ever disturbing an entity marker boundary.
//! 3. **Labeling** ([`label`]): the whitespace words of the cleaned text
//!    become `(token, BIO-tag)` pairs, with open spans tracked across
//!    tokens per document.
//! 4. **Encoding & validation** ([`bio`]): generic BIO prefixing for bare
//!    category streams, and structural validation of CoNLL lines.
//! 5. **Splitting** ([`split`]): long labeled sequences are partitioned
//!    into bounded chunks without ever cutting through an entity span.
//! 6. **Alignment** ([`align`]): per-sentence model predictions (character
//!    offsets) are mapped back onto whitespace words.
//!
//! [`corpus`] holds the CoNLL reader, sentence assembly and annotation QA
//! helpers around the pipeline.
//!
//! ## Example
//!
//! ```rust
//! use abacus_core::{clean_sermon, label_document, Abbreviations};
//!
//! let abbr = Abbreviations::default();
//! let cleaned = clean_sermon("Er traf<PERSON>Karl.</PERSON>heute", &abbr);
//! assert_eq!(cleaned, "Er traf <PERSON>Karl</PERSON> heute");
//!
//! let tokens = label_document(&cleaned);
//! assert_eq!(tokens[2].text, "Karl");
//! assert_eq!(tokens[2].tag.label(), "B-PER");
//! ```
//!
//! Everything is synchronous and single-threaded; the only state carried
//! across tokens is the per-document span tracker in [`label`].

pub mod align;
pub mod bio;
pub mod clean;
pub mod corpus;
pub mod label;
pub mod markup;
pub mod split;
pub mod tag;

pub use align::{align_predictions, Prediction};
pub use bio::{check_bio_validity, transform_to_bio, BioReport};
pub use clean::{clean_sermon, Abbreviations, CleanError};
pub use corpus::{make_sentences, read_conll_data, CorpusError};
pub use label::{label_document, SpanTracker};
pub use markup::{rename_entity_tags, strip_markup, AllowList, MarkupTree};
pub use split::{find_good_split, SplitError, SplitTree, DEFAULT_SPLIT_INDEX};
pub use tag::{BioTag, EntityKind, LabeledToken, SequenceItem};
