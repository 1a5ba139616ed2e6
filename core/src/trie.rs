//! Prefix trie over rune sequences, keyed by `char`, with terminals
//! carrying the arena index of a [`crate::dictionary::DictUnit`] rather
//! than a pointer or reference — see the arena-with-indices note in the
//! crate-level docs.

use std::collections::HashMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    unit: Option<u32>,
}

#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
}

impl Trie {
    pub fn new() -> Self {
        Trie::default()
    }

    /// Adds or overwrites the terminal for `word`.
    pub fn insert(&mut self, word: &[char], unit_index: u32) {
        let mut node = &mut self.root;
        for &ch in word {
            node = node.children.entry(ch).or_default();
        }
        node.unit = Some(unit_index);
    }

    /// Removes the terminal for `word`, if any. Interior nodes are left in
    /// place; only the terminal marker is cleared.
    pub fn remove(&mut self, word: &[char]) {
        let mut node = &mut self.root;
        for &ch in word {
            match node.children.get_mut(&ch) {
                Some(child) => node = child,
                None => return,
            }
        }
        node.unit = None;
    }

    pub fn find_exact(&self, word: &[char]) -> Option<u32> {
        let mut node = &self.root;
        for &ch in word {
            node = node.children.get(&ch)?;
        }
        node.unit
    }

    /// Walks the trie from rune index `start` (within `runes`, itself
    /// bounded by `end`), up to `max_word_len` runes, returning every
    /// terminal found as `(end_index_exclusive, unit_index)`, in order of
    /// increasing length.
    fn walk_prefixes(&self, runes: &[char], start: usize, end: usize, max_word_len: usize) -> Vec<(usize, u32)> {
        let mut out = Vec::new();
        let mut node = &self.root;
        let mut idx = start;
        let limit = end.min(start + max_word_len);
        while idx < limit {
            match node.children.get(&runes[idx]) {
                Some(child) => {
                    node = child;
                    idx += 1;
                    if let Some(unit) = node.unit {
                        out.push((idx, unit));
                    }
                }
                None => break,
            }
        }
        out
    }
}

/// One edge of a DAG row: either a dictionary word (`Some`) ending at
/// `next`, or the degenerate single-rune fallback (`None`) used when no
/// dictionary word starts at this position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DagEdge {
    pub next: usize,
    pub unit: Option<u32>,
}

pub type DagRow = Vec<DagEdge>;

/// Builds the DAG for the rune span `[begin, end)`. Every position holds at
/// least one edge: the dictionary hits found by walking the trie from that
/// position, or — when none exist — the single-rune fallback to `i + 1`.
pub fn build_dag(trie: &Trie, runes: &[char], begin: usize, end: usize, max_word_len: usize) -> Vec<DagRow> {
    let mut dag = Vec::with_capacity(end - begin);
    for i in begin..end {
        let hits = trie.walk_prefixes(runes, i, end, max_word_len);
        let row = if hits.is_empty() {
            vec![DagEdge { next: i + 1, unit: None }]
        } else {
            hits.into_iter().map(|(next, unit)| DagEdge { next, unit: Some(unit) }).collect()
        };
        dag.push(row);
    }
    dag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_exact_round_trips_with_insert_and_remove() {
        let mut trie = Trie::new();
        let word: Vec<char> = "网易".chars().collect();
        trie.insert(&word, 7);
        assert_eq!(trie.find_exact(&word), Some(7));
        trie.remove(&word);
        assert_eq!(trie.find_exact(&word), None);
    }

    #[test]
    fn find_exact_distinguishes_prefix_from_whole_word() {
        let mut trie = Trie::new();
        let full: Vec<char> = "清华大学".chars().collect();
        trie.insert(&full, 1);
        let prefix: Vec<char> = "清华".chars().collect();
        assert_eq!(trie.find_exact(&prefix), None);
        assert_eq!(trie.find_exact(&full), Some(1));
    }

    #[test]
    fn build_dag_falls_back_to_single_rune_edge_when_no_word_matches() {
        let trie = Trie::new();
        let runes: Vec<char> = "到".chars().collect();
        let dag = build_dag(&trie, &runes, 0, 1, 512);
        assert_eq!(dag.len(), 1);
        assert_eq!(dag[0], vec![DagEdge { next: 1, unit: None }]);
    }

    #[test]
    fn build_dag_orders_edges_by_increasing_next_position() {
        let mut trie = Trie::new();
        let qinghua: Vec<char> = "清华".chars().collect();
        let qinghua_daxue: Vec<char> = "清华大学".chars().collect();
        trie.insert(&qinghua, 10);
        trie.insert(&qinghua_daxue, 11);
        let runes: Vec<char> = "清华大学".chars().collect();
        let dag = build_dag(&trie, &runes, 0, 4, 512);
        assert_eq!(dag[0], vec![
            DagEdge { next: 2, unit: Some(10) },
            DagEdge { next: 4, unit: Some(11) },
        ]);
    }

    #[test]
    fn max_word_len_caps_how_far_a_walk_can_extend() {
        let mut trie = Trie::new();
        let word: Vec<char> = "清华大学".chars().collect();
        trie.insert(&word, 1);
        let runes: Vec<char> = "清华大学".chars().collect();
        let dag = build_dag(&trie, &runes, 0, 4, 2);
        // The 4-rune word cannot be found within a 2-rune cap, so position 0
        // falls back to the degenerate edge.
        assert_eq!(dag[0], vec![DagEdge { next: 1, unit: None }]);
    }
}
