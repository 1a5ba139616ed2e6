//! Full segmenter: emits every dictionary word found anywhere in the DAG,
//! not just the maximum-probability path, while still avoiding redundant
//! single-rune filler over spans a longer word already covers.

use crate::dictionary::Dictionary;
use crate::rune::WordRange;
use crate::trie::{build_dag, Trie};

/// Cuts `[begin, end)` returning every qualifying DAG edge: words of rune
/// length two or more are always kept, and a length-one edge (whether a
/// real one-rune dictionary entry or the degenerate fallback) is kept only
/// when it is the sole edge at its position and no longer word already
/// reaches past that position.
pub fn cut_full(
    trie: &Trie,
    dict: &Dictionary,
    runes: &[char],
    begin: usize,
    end: usize,
    max_word_len: usize,
) -> Vec<WordRange> {
    let dag = build_dag(trie, runes, begin, end, max_word_len);
    let mut max_covered = 0usize;
    let mut out = Vec::new();

    for (i, row) in dag.iter().enumerate() {
        for edge in row {
            let word_len = match edge.unit {
                Some(unit) => dict.unit(unit).word.len(),
                None => 1,
            };
            let emit = match edge.unit {
                Some(_) => word_len >= 2 || (row.len() == 1 && max_covered <= i),
                None => row.len() == 1 && max_covered <= i,
            };
            if emit {
                out.push(WordRange::new(begin + i, edge.next - 1));
            }
            max_covered = max_covered.max(i + word_len);
        }
    }
    out
}
