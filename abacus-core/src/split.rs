//! # Boundary-Respecting Splitting
//!
//! The transformer models downstream choke on the full-length sermons, so
//! long labeled sequences are partitioned into bounded chunks. A chunk
//! boundary must never fall inside a multi-token entity: splitting between
//! a `B-`/`I-` token and its `I-` continuation would orphan the
//! continuation tag.
//!
//! [`find_good_split`] keeps the original recursive shape: try the
//! candidate index, slide it right while it would sever an entity, and
//! when the left side is still too long, re-split both halves with half
//! the candidate index.

use crate::tag::LabeledToken;
use thiserror::Error;

/// The candidate index walked past the end of the sequence without finding
/// a split point outside an entity. Callers must make sure the sequence is
/// long enough relative to the initial index.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no valid split point at or after index {index} in a sequence of {len} tokens")]
pub struct SplitError {
    pub index: usize,
    pub len: usize,
}

/// Hard ceiling for a leaf partition produced by a direct split.
const MAX_PARTITION: usize = 300;

/// Default candidate index for the first split attempt.
pub const DEFAULT_SPLIT_INDEX: usize = 250;

/// Result of splitting: a binary tree whose in-order leaves are the final
/// partitions. Leaves borrow from the input; the splitter partitions,
/// it never edits tokens.
#[derive(Debug, PartialEq, Eq)]
pub enum SplitTree<'a> {
    Leaf(&'a [LabeledToken]),
    Branch(Box<SplitTree<'a>>, Box<SplitTree<'a>>),
}

impl<'a> SplitTree<'a> {
    /// The leaf partitions in order. Concatenated, they reproduce the
    /// input sequence exactly.
    pub fn leaves(&self) -> Vec<&'a [LabeledToken]> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<&'a [LabeledToken]>) {
        match self {
            SplitTree::Leaf(slice) => out.push(slice),
            SplitTree::Branch(left, right) => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }
}

/// Splits a labeled sequence at (or after) `index` without cutting through
/// an entity span.
///
/// If the label at the candidate index is a continuation tag, the
/// candidate advances by one and is retried; advancing past the end yields
/// a [`SplitError`]. Once a safe index is found, the sequence is split in
/// two; if the left part would reach the partition ceiling, both halves
/// are instead re-split recursively with half the candidate index.
pub fn find_good_split(
    tokens: &[LabeledToken],
    index: usize,
) -> Result<SplitTree<'_>, SplitError> {
    let mut index = index;
    loop {
        let token = tokens.get(index).ok_or(SplitError {
            index,
            len: tokens.len(),
        })?;
        if token.tag.is_continuation() {
            index += 1;
            continue;
        }
        let (left, right) = tokens.split_at(index);
        return if left.len() < MAX_PARTITION {
            Ok(SplitTree::Branch(
                Box::new(SplitTree::Leaf(left)),
                Box::new(SplitTree::Leaf(right)),
            ))
        } else {
            Ok(SplitTree::Branch(
                Box::new(find_good_split(left, index / 2)?),
                Box::new(find_good_split(right, index / 2)?),
            ))
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{BioTag, EntityKind, LabeledToken};

    fn outside(n: usize) -> Vec<LabeledToken> {
        (0..n)
            .map(|i| LabeledToken::new(format!("w{i}"), BioTag::Outside))
            .collect()
    }

    fn entity_at(tokens: &mut [LabeledToken], start: usize, len: usize) {
        tokens[start].tag = BioTag::Begin(EntityKind::Person);
        for t in tokens.iter_mut().skip(start + 1).take(len - 1) {
            t.tag = BioTag::Inside(EntityKind::Person);
        }
    }

    #[test]
    fn test_plain_split_at_index() {
        let tokens = outside(400);
        let tree = find_good_split(&tokens, 250).unwrap();
        let leaves = tree.leaves();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].len(), 250);
        assert_eq!(leaves[1].len(), 150);
    }

    #[test]
    fn test_split_slides_past_entity() {
        let mut tokens = outside(400);
        // Entity spanning indices 248..=252 → candidates 250..=252 are I-PER.
        entity_at(&mut tokens, 248, 5);
        let tree = find_good_split(&tokens, 250).unwrap();
        let leaves = tree.leaves();
        assert_eq!(leaves[0].len(), 253);
        assert_eq!(leaves[1].len(), 147);
        for leaf in leaves {
            assert!(!leaf[0].tag.is_continuation());
        }
    }

    #[test]
    fn test_leaves_concatenate_to_input() {
        let mut tokens = outside(900);
        entity_at(&mut tokens, 310, 4);
        entity_at(&mut tokens, 440, 3);
        let tree = find_good_split(&tokens, 320).unwrap();
        let rebuilt: Vec<LabeledToken> = tree
            .leaves()
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        assert_eq!(rebuilt, tokens);
    }

    #[test]
    fn test_oversized_left_side_is_resplit() {
        let tokens = outside(900);
        let tree = find_good_split(&tokens, 450).unwrap();
        let leaves = tree.leaves();
        assert!(leaves.len() > 2);
        assert_eq!(leaves.iter().map(|l| l.len()).sum::<usize>(), 900);
    }

    #[test]
    fn test_no_leaf_starts_with_continuation() {
        let mut tokens = outside(900);
        entity_at(&mut tokens, 224, 4);
        entity_at(&mut tokens, 448, 6);
        let tree = find_good_split(&tokens, 450).unwrap();
        for leaf in tree.leaves() {
            assert!(!leaf.is_empty());
            assert!(!leaf[0].tag.is_continuation());
        }
    }

    #[test]
    fn test_walking_past_end_is_an_error() {
        let mut tokens = outside(10);
        entity_at(&mut tokens, 4, 6);
        let err = find_good_split(&tokens, 5).unwrap_err();
        assert_eq!(err, SplitError { index: 10, len: 10 });
    }

    #[test]
    fn test_index_beyond_sequence_is_an_error() {
        let tokens = outside(10);
        assert!(find_good_split(&tokens, 250).is_err());
    }
}
