//! # Sermon Text Cleanup
//!
//! Normalizes the raw transcript text around the `<PERSON>`/`<LOCATION>`
//! entity markers so the downstream whitespace tokenizer sees clean, dot-free
//! words with entity markers sitting exactly on token boundaries.
//!
//! The cleanup is an **ordered chain of rewrite rules**, each a pure
//! `&str -> String` function. Order matters: marker spacing must run before
//! any destructive rule so cleanup characters next to a marker can never
//! corrupt an entity boundary, and the dot heuristics depend on the noise
//! and hyphen passes having run first. [`clean_sermon`] applies the whole
//! chain; the individual rules are exported so each can be tested on its
//! own.
//!
//! Most of the dot handling exists because the transcripts abbreviate
//! aggressively ("Röm. Käyserl. Maj.", bible verses like "Matth. 5"), and a
//! stray dot inside a name would otherwise end up glued to a token.

use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Failure while loading the abbreviation word-lists.
///
/// Cleanup cannot run without them, so this is fatal at startup.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("failed to read abbreviation list {path}: {source}")]
    AbbreviationList {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The two externally supplied abbreviation word-lists (bible books and
/// Latin abbreviations), one entry per line, no inline comments.
///
/// A dot directly following any listed word (preceded by a space) is a
/// known abbreviation dot and gets stripped by the final cleanup rule.
#[derive(Debug, Clone, Default)]
pub struct Abbreviations {
    pub bible: Vec<String>,
    pub latin: Vec<String>,
}

impl Abbreviations {
    /// Reads both lists from newline-delimited text files. Blank lines are
    /// skipped. A missing file is a fatal error.
    pub fn load(bible_path: &Path, latin_path: &Path) -> Result<Self, CleanError> {
        Ok(Self {
            bible: read_word_list(bible_path)?,
            latin: read_word_list(latin_path)?,
        })
    }

    /// Builds the lists from in-memory entries (used by tests).
    pub fn from_lines<S: AsRef<str>>(bible: &[S], latin: &[S]) -> Self {
        Self {
            bible: bible.iter().map(|s| s.as_ref().to_string()).collect(),
            latin: latin.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

fn read_word_list(path: &Path) -> Result<Vec<String>, CleanError> {
    let text = std::fs::read_to_string(path).map_err(|source| CleanError::AbbreviationList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Applies the full cleanup chain in its fixed order.
pub fn clean_sermon(text: &str, abbr: &Abbreviations) -> String {
    let text = space_out_markers(text);
    let text = strip_noise(&text);
    let text = drop_parentheticals(&text);
    let text = space_after_punctuation(&text);
    let text = repair_hyphenation(&text);
    let text = strip_decorations(&text);
    let text = strip_abbreviation_dots(&text);
    let text = normalize_overlines(&text);
    let text = clean_marker_interiors(&text);
    let text = tighten_markers(&text);
    let text = strip_listed_abbreviation_dots(&text, abbr);
    decode_entities(&text)
}

static AFTER_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</(PERSON|LOCATION)>(\S)").unwrap());
static BEFORE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)<(PERSON|LOCATION)>").unwrap());

/// Inserts a space between an entity marker and an adjacent non-space
/// character, so entity spans always start and end on token boundaries.
///
/// This must be the very first rule: everything after it may delete or move
/// characters next to a marker.
pub fn space_out_markers(text: &str) -> String {
    let text = AFTER_CLOSE.replace_all(text, "</${1}> ${2}");
    BEFORE_OPEN.replace_all(&text, "${1} <${2}>").into_owned()
}

/// Removes transcription noise: stray slashes (the Virgel used as a comma
/// in the old prints), pipes marking line breaks, literal line breaks,
/// non-breaking/thin spaces, the `[vakat]` placeholder, brackets, editorial
/// boilerplate and guillemets.
pub fn strip_noise(text: &str) -> String {
    // A slash is part of a closing tag only when directly preceded by '<'.
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if c == '/' && prev != Some('<') {
            prev = Some(c);
            continue;
        }
        out.push(c);
        prev = Some(c);
    }

    out.replace('|', "")
        .replace(['\n', '\r'], " ")
        .replace('\u{a0}', "")
        .replace('\u{2002}', "")
        .replace("[vakat]", "")
        .replace(['[', ']'], "")
        .replace("<div class=\"edition\">", "")
        .replace("</div>", "")
        .replace("Einzelanmerkungen", "")
        .replace("<div>", "")
        .replace("<?xml version=\"1.0\" encoding=\"UTF-8\"?>", "")
        .replace(['»', '«', '‹', '›'], "")
}

static SHORT_PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\S{1,3}\)").unwrap());
static TRAILING_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ([A-Za-z]|[0-9]|\*+)\)").unwrap());

/// Drops short parenthetical asides (1-3 characters) and trailing
/// single-letter/digit/asterisk footnote references followed by a closing
/// paren.
pub fn drop_parentheticals(text: &str) -> String {
    let text = SHORT_PARENS.replace_all(text, "");
    TRAILING_REF.replace_all(&text, " ").into_owned()
}

static PUNCT_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([.?!,;:])(\w)").unwrap());

/// Inserts a space after sentence punctuation that is glued to the next
/// word, so later dot removal cannot fuse two words together.
pub fn space_after_punctuation(text: &str) -> String {
    PUNCT_WORD.replace_all(text, "${1} ${2}").into_owned()
}

static HYPHEN_UND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[=|-]\s*und").unwrap());
static HYPHEN_LOWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[=|-]\s*([a-zäöüß]{1,3})").unwrap());
static HYPHEN_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[=|-]\s*([A-ZÄÖÜ])").unwrap());

/// Repairs the hyphenation of the prints, where both `-` and `=` split
/// words across lines:
///
/// - `=`/`-` before "und" is an elliptic compound ("Brandt= und Mord...")
///   and becomes `- und`;
/// - before a lowercase letter it joins a word split across lines;
/// - before an uppercase letter it is a word break and becomes a space.
pub fn repair_hyphenation(text: &str) -> String {
    let text = HYPHEN_UND.replace_all(text, "- und");
    // The "und" continuation was already handled above; keep it untouched
    // here. 1-3 letters of context stand in for a lookahead.
    let text = HYPHEN_LOWER.replace_all(&text, |caps: &Captures| {
        if &caps[1] == "und" {
            caps[0].to_string()
        } else {
            caps[1].to_string()
        }
    });
    HYPHEN_UPPER.replace_all(&text, " ${1}").into_owned()
}

/// Strips decorative punctuation with no tokenization value: plain and
/// typographic quotes, braces, accents, section signs, asterisks and all
/// remaining dashes.
pub fn strip_decorations(text: &str) -> String {
    text.replace(['"', '\''], "")
        .replace(['“', '”', '‘', '’', '‚', '„'], "")
        .replace(['{', '}'], "")
        .replace(['´', '`'], "")
        .replace('§', "")
        .replace("))", "")
        .replace('☿', "")
        .replace('*', "")
        .replace(['–', '─', '-'], "")
}

static DOT_MIDWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\S)\.([a-z])").unwrap());
static DOT_SINGLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"( \w)\.").unwrap());
static DOT_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9])\.").unwrap());
static DOT_UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Z])\.").unwrap());

/// Honorific abbreviations frequent in the Viennese sermons ("Röm. Käyserl.
/// Maj." and friends) whose dots survive the generic heuristics.
const HONORIFICS: &[(&str, &str)] = &[
    ("Oe.", "Oe"),
    ("Maj.", "Maj"),
    ("Majest.", "Majest"),
    ("Röm.", "Röm"),
    ("Käyserl.", "Käyserl"),
    ("Kays.", "Kays"),
];

/// Removes as many abbreviation dots as possible, in a fixed order:
/// mid-word dots joining a lowercase continuation, known Latin roots,
/// single-letter abbreviations, dots after digits, dots after a single
/// capital. The capital rule runs a second time after the honorific table
/// to catch dots freed by those replacements.
pub fn strip_abbreviation_dots(text: &str) -> String {
    let text = DOT_MIDWORD.replace_all(text, "${1}${2}");
    let text = text
        .replace("St.", "St")
        .replace("Cap.", "Cap")
        .replace("cap.", "Cap")
        .replace("Hist.", "Hist");
    let text = DOT_SINGLE.replace_all(&text, "${1}");
    let text = DOT_DIGIT.replace_all(&text, "${1}");
    let mut text = DOT_UPPER.replace_all(&text, "${1}").into_owned();
    for (from, to) in HONORIFICS {
        text = text.replace(from, to);
    }
    DOT_UPPER.replace_all(&text, "${1}").into_owned()
}

/// Expands the three combining-overline letters of the historical
/// orthography (n̅ → nn, m̅ → mm, e̅ → en).
pub fn normalize_overlines(text: &str) -> String {
    text.replace("n\u{305}", "nn")
        .replace("m\u{305}", "mm")
        .replace("e\u{305}", "en")
}

static TAG_DOTTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(PERSON|LOCATION)>(\w+\.( \w+\.)*)</(?:PERSON|LOCATION)>").unwrap());
static TAG_COLONED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(PERSON|LOCATION)>(\w+:( \w+:)*)</(?:PERSON|LOCATION)>").unwrap());
static TRAILING_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.,:?!])</(PERSON|LOCATION)>").unwrap());

/// Inside entity markers, turns the dots/colons of abbreviated name parts
/// ("Joh: Chrys:") into spaces, but only when the whole marker content is
/// word tokens separated by those characters. Trailing sentence punctuation
/// directly before a closing marker is moved after the marker instead.
pub fn clean_marker_interiors(text: &str) -> String {
    let text = TAG_DOTTED.replace_all(text, |caps: &Captures| {
        format!("<{0}>{1}</{0}>", &caps[1], caps[2].replace('.', " "))
    });
    let text = TAG_COLONED.replace_all(&text, |caps: &Captures| {
        format!("<{0}>{1}</{0}>", &caps[1], caps[2].replace(':', " "))
    });
    TRAILING_PUNCT.replace_all(&text, "</${2}>${1}").into_owned()
}

/// Removes a single leading/trailing space directly inside entity markers.
pub fn tighten_markers(text: &str) -> String {
    text.replace("<PERSON> ", "<PERSON>")
        .replace("<LOCATION> ", "<LOCATION>")
        .replace(" </PERSON>", "</PERSON>")
        .replace(" </LOCATION>", "</LOCATION>")
}

/// Strips the final dot after any word listed in the bible or Latin
/// abbreviation lists (matched as the literal preceding word plus a space).
pub fn strip_listed_abbreviation_dots(text: &str, abbr: &Abbreviations) -> String {
    let mut text = text.to_string();
    for word in abbr.bible.iter().chain(abbr.latin.iter()) {
        text = text.replace(&format!(" {word}."), &format!(" {word}"));
    }
    text
}

/// Decodes the XML character entities left over from the source files.
/// `&amp;` is spelled out as "und", the rest carry no content.
pub fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "und")
        .replace("&gt;", "")
        .replace("&lt;", "")
        .replace("&quot;", "")
        .replace("&apos;", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_abbr() -> Abbreviations {
        Abbreviations::default()
    }

    #[test]
    fn test_marker_spacing_and_dot_in_name() {
        let out = clean_sermon("Er traf<PERSON>Karl.</PERSON>heute", &no_abbr());
        assert_eq!(out, "Er traf <PERSON>Karl</PERSON> heute");
    }

    #[test]
    fn test_trailing_comma_moved_out_of_marker() {
        let out = clean_sermon("Er sahe <LOCATION>Wien,</LOCATION> an", &no_abbr());
        assert_eq!(out, "Er sahe <LOCATION>Wien</LOCATION>, an");
    }

    #[test]
    fn test_coloned_name_parts_inside_marker() {
        let out = clean_marker_interiors("<PERSON>Joh: Chrys:</PERSON>");
        assert_eq!(out, "<PERSON>Joh  Chrys </PERSON>");
        let out = tighten_markers(&out);
        assert_eq!(out, "<PERSON>Joh  Chrys</PERSON>");
    }

    #[test]
    fn test_slash_removal_spares_closing_tags() {
        let out = strip_noise("halb/ tot</PERSON>");
        assert_eq!(out, "halb tot</PERSON>");
    }

    #[test]
    fn test_noise_characters_removed() {
        let out = strip_noise("Das|ist [vakat] gut\nso");
        assert_eq!(out, "Dasist  gut so");
    }

    #[test]
    fn test_short_parentheticals_and_footnote_refs() {
        let out = drop_parentheticals("Er (a) kam b) her");
        assert_eq!(out, "Er  kam  her");
    }

    #[test]
    fn test_space_after_sentence_punctuation() {
        assert_eq!(space_after_punctuation("kam.Er"), "kam. Er");
        assert_eq!(space_after_punctuation("kam. Er"), "kam. Er");
    }

    #[test]
    fn test_hyphenation_joins_split_words() {
        assert_eq!(repair_hyphenation("Gottes=furcht"), "Gottesfurcht");
        assert_eq!(repair_hyphenation("Gottes- furcht"), "Gottesfurcht");
    }

    #[test]
    fn test_hyphenation_breaks_before_uppercase() {
        assert_eq!(repair_hyphenation("Himmel=Erde"), "Himmel Erde");
    }

    #[test]
    fn test_hyphenation_keeps_elliptic_und() {
        // The hyphen itself falls to the decoration pass afterwards.
        assert_eq!(repair_hyphenation("Brandt= und Mord"), "Brandt- und Mord");
        let out = clean_sermon("Brandt= und Mord", &no_abbr());
        assert_eq!(out, "Brandt und Mord");
    }

    #[test]
    fn test_abbreviation_dot_heuristics() {
        assert_eq!(strip_abbreviation_dots("Der H. Geist"), "Der H Geist");
        assert_eq!(strip_abbreviation_dots("Anno 1683."), "Anno 1683");
        assert_eq!(
            strip_abbreviation_dots("Röm. Kays. Maj."),
            "Röm Kays Maj"
        );
        assert_eq!(strip_abbreviation_dots("St. Stephan"), "St Stephan");
    }

    #[test]
    fn test_midword_dot_joins_lowercase() {
        assert_eq!(strip_abbreviation_dots("Got.tes"), "Gottes");
    }

    #[test]
    fn test_overline_expansion() {
        assert_eq!(normalize_overlines("vn\u{305} de\u{305}"), "vnn den");
        assert_eq!(normalize_overlines("fromm\u{305}"), "frommm");
    }

    #[test]
    fn test_listed_abbreviations() {
        let abbr = Abbreviations::from_lines(&["Matth", "Ps"], &["etc", "ibid"]);
        let out = clean_sermon("Er sprach Matth. 5 etc. davon", &abbr);
        assert_eq!(out, "Er sprach Matth 5 etc davon");
    }

    #[test]
    fn test_entity_decode() {
        assert_eq!(decode_entities("Feuer &amp; Wasser &gt;"), "Feuer und Wasser ");
    }

    #[test]
    fn test_plain_text_is_stable() {
        let abbr = no_abbr();
        let once = clean_sermon("Er kam heute nach Wien", &abbr);
        assert_eq!(once, "Er kam heute nach Wien");
        assert_eq!(clean_sermon(&once, &abbr), once);
    }

    #[test]
    fn test_missing_abbreviation_file_is_fatal() {
        let err = Abbreviations::load(
            Path::new("/nonexistent/bible_abbr.txt"),
            Path::new("/nonexistent/latin_abbr.txt"),
        );
        assert!(err.is_err());
    }
}
