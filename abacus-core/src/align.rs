//! # Prediction Alignment
//!
//! Maps the per-sentence output of the external inference model back onto
//! the whitespace words of the sentence. The model reports character start
//! offsets; a word gets the entity group of the first prediction whose
//! start offset lands *exactly* on the word's own start offset, and `"O"`
//! otherwise. A prediction whose offset falls mid-word (the model's
//! subword tokenizer does not always agree with our whitespace words) is
//! silently dropped.

use serde::Deserialize;

/// One prediction record for a sentence, as produced by the external
/// inference collaborator. Read-only, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    /// Character start offset of the predicted entity within the sentence.
    pub start: usize,
    /// Entity group label (e.g. "PER", "LOC").
    pub entity_group: String,
}

/// Re-tokenizes `sentence` by single spaces and labels each word from the
/// predictions. Returns parallel word and label lists.
///
/// Offsets count characters, not bytes: the model side counts the same
/// way, and the sermons are full of umlauts.
pub fn align_predictions(sentence: &str, predictions: &[Prediction]) -> (Vec<String>, Vec<String>) {
    let words: Vec<String> = sentence.split(' ').map(str::to_string).collect();
    let mut labels = Vec::with_capacity(words.len());

    let mut running_char = 0usize;
    for word in &words {
        let label = predictions
            .iter()
            .find(|p| p.start == running_char)
            .map(|p| p.entity_group.clone())
            .unwrap_or_else(|| "O".to_string());
        labels.push(label);
        running_char += word.chars().count() + 1;
    }

    (words, labels)
}
