//! # Corpus I/O and QA Utilities
//!
//! Reading the prepared CoNLL-style corpus back in, assembling sentence
//! strings from token streams, and a couple of QA helpers used to audit
//! the annotation before training.
//!
//! ## CoNLL format
//!
//! Documents are separated by a blank line (a stray tab-only line also
//! counts); every non-blank line is `<token>\t<label>`. A line without the
//! tab separator is a fatal parse error: the corpus is broken and must
//! not be silently repaired.

use crate::tag::SequenceItem;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Failure while reading a CoNLL corpus file.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corpus line without tab separator: {line:?}")]
    MissingTab { line: String },
}

static DOC_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\t?\n").unwrap());

/// Reads a CoNLL-style corpus file into per-document token and label
/// lists. The two outer vectors are parallel: `tokens[i]` and `labels[i]`
/// belong to the same document.
pub fn read_conll_data(path: &Path) -> Result<(Vec<Vec<String>>, Vec<Vec<String>>), CorpusError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut token_docs = Vec::new();
    let mut label_docs = Vec::new();
    for doc in DOC_SEPARATOR.split(raw.trim()) {
        let mut tokens = Vec::new();
        let mut labels = Vec::new();
        for line in doc.split('\n') {
            let (token, label) = line.split_once('\t').ok_or_else(|| CorpusError::MissingTab {
                line: line.to_string(),
            })?;
            tokens.push(token.to_string());
            labels.push(label.to_string());
        }
        token_docs.push(tokens);
        label_docs.push(labels);
    }

    Ok((token_docs, label_docs))
}

/// Punctuation attached to the previous word without a space when
/// assembling sentences.
const CLINGING_PUNCTUATION: &[&str] = &[".", "!", "?", ":", ",", ";"];

/// Joins a token stream back into sentence strings. Sentence boundaries in
/// the stream end the current sentence; punctuation tokens attach to the
/// preceding word, everything else is space-separated.
pub fn make_sentences(items: &[SequenceItem]) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut sentence = String::new();
    for item in items {
        match item {
            SequenceItem::Value(token) => {
                if CLINGING_PUNCTUATION.contains(&token.as_str()) {
                    sentence.push_str(token);
                } else {
                    sentence.push(' ');
                    sentence.push_str(token);
                }
            }
            SequenceItem::Break => {
                sentences.push(std::mem::take(&mut sentence));
            }
        }
    }
    sentences.push(sentence);
    sentences
}

static PERSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<PERSON>(.*?)</PERSON>").unwrap());
static LOCATION_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<LOCATION>(.*?)</LOCATION>").unwrap());

/// All entity span contents of a marker-annotated sermon.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameList {
    pub persons: Vec<String>,
    pub locations: Vec<String>,
}

/// Collects the contents of every `<PERSON>`/`<LOCATION>` span.
pub fn create_name_list(sermon: &str) -> NameList {
    NameList {
        persons: PERSON_SPAN
            .captures_iter(sermon)
            .map(|c| c[1].to_string())
            .collect(),
        locations: LOCATION_SPAN
            .captures_iter(sermon)
            .map(|c| c[1].to_string())
            .collect(),
    }
}

static LONG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<PERSON>\w+\s\w+\s\w+\s\w+(\s\w+)+</PERSON>").unwrap());
static FIVE_WORD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<PERSON>\w+\s\w+\s\w+\s\w+\s\w+</PERSON>").unwrap());
static NOBILIARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" zu | von | de ").unwrap());

/// QA helper: lists conspicuously long person names so they can be audited
/// (and usually filtered) before training.
///
/// Two overlapping filters, kept as they behave on the real corpus: names
/// of five or more words, plus exactly-five-word names containing a
/// nobiliary particle ("Ernst Graff zu Schauenburg und Hollstein").
pub fn get_long_names(sermon: &str) -> Vec<String> {
    let mut names: Vec<String> = LONG_NAME
        .find_iter(sermon)
        .map(|m| m.as_str().to_string())
        .collect();
    names.extend(
        FIVE_WORD_NAME
            .find_iter(sermon)
            .map(|m| m.as_str().to_string())
            .filter(|name| NOBILIARY.is_match(name)),
    );
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("abacus-conll-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_read_conll_documents() {
        let path = write_temp("corpus.conll", "Maria\tB-PER\nging\tO\n\nWien\tB-LOC\n");
        let (tokens, labels) = read_conll_data(&path).unwrap();
        assert_eq!(tokens, vec![vec!["Maria", "ging"], vec!["Wien"]]);
        assert_eq!(labels, vec![vec!["B-PER", "O"], vec!["B-LOC"]]);
    }

    #[test]
    fn test_read_conll_accepts_tab_only_separator() {
        let path = write_temp("tab_sep.conll", "Maria\tB-PER\n\t\nWien\tB-LOC\n");
        let (tokens, _) = read_conll_data(&path).unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_read_conll_missing_tab_is_fatal() {
        let path = write_temp("broken.conll", "Maria\tB-PER\nging O\n");
        let err = read_conll_data(&path).unwrap_err();
        assert!(matches!(err, CorpusError::MissingTab { ref line } if line == "ging O"));
    }

    #[test]
    fn test_make_sentences_attaches_punctuation() {
        let items = vec![
            SequenceItem::value("Karl"),
            SequenceItem::value("ging"),
            SequenceItem::value("."),
            SequenceItem::Break,
            SequenceItem::value("Heute"),
        ];
        assert_eq!(make_sentences(&items), vec![" Karl ging.", " Heute"]);
    }

    #[test]
    fn test_create_name_list() {
        let sermon =
            "<PERSON>Karl</PERSON> zu <LOCATION>Wien</LOCATION> und <PERSON>Maria</PERSON>";
        let names = create_name_list(sermon);
        assert_eq!(names.persons, vec!["Karl", "Maria"]);
        assert_eq!(names.locations, vec!["Wien"]);
    }

    #[test]
    fn test_get_long_names() {
        let sermon = concat!(
            "<PERSON>Ernst Graff zu Schauenburg und Hollstein</PERSON> sprach mit ",
            "<PERSON>Maria</PERSON> und <PERSON>Hanns von Werth zu Kirchberg</PERSON>",
        );
        let names = get_long_names(sermon);
        // The six-word name matches both filters, the five-word nobiliary
        // name only the second, the short name neither.
        assert_eq!(names.len(), 3);
        assert!(names
            .iter()
            .all(|n| n.contains("Schauenburg") || n.contains("Kirchberg")));
    }
}
