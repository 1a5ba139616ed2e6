//! Maximum-probability segmenter: backward dynamic programming over a DAG,
//! then a forward emission pass along the winning path.

use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::hmm::MIN_DOUBLE;
use crate::rune::WordRange;
use crate::trie::{build_dag, DagEdge, Trie};

/// Cuts the rune span `[begin, end)` along the path of maximum total
/// log-weight through the DAG. Degenerate (dictionary-miss) edges are
/// priced at the dictionary's minimum observed weight, so an unknown rune
/// never beats a real, however rare, dictionary word.
pub fn cut_mp(
    trie: &Trie,
    dict: &Dictionary,
    runes: &[char],
    begin: usize,
    end: usize,
    max_word_len: usize,
) -> Result<Vec<WordRange>> {
    let dag = build_dag(trie, runes, begin, end, max_word_len);
    let n = dag.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut dp_weight = vec![0.0f64; n];
    let mut choice: Vec<DagEdge> = vec![DagEdge { next: 0, unit: None }; n];

    for i in (0..n).rev() {
        let row = &dag[i];
        if row.is_empty() {
            return Err(Error::internal("dag row has no edges"));
        }
        let mut best = MIN_DOUBLE;
        let mut best_edge = row[0];
        for &edge in row {
            let local_next = edge.next - begin;
            let mut val = 0.0;
            if local_next < n {
                val += dp_weight[local_next];
            }
            val += match edge.unit {
                Some(unit) => dict.unit(unit).weight,
                None => dict.min_weight(),
            };
            if val > best {
                best = val;
                best_edge = edge;
            }
        }
        dp_weight[i] = best;
        choice[i] = best_edge;
    }

    let mut words = Vec::with_capacity(n);
    let mut i = 0usize;
    while i < n {
        let edge = choice[i];
        let abs_begin = begin + i;
        if edge.next <= abs_begin || edge.next > end {
            return Err(Error::internal("dag edge points outside the cut span"));
        }
        words.push(WordRange::new(abs_begin, edge.next - 1));
        i = edge.next - begin;
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightPolicy;
    use std::io::Cursor;

    fn build(text: &str) -> (Trie, Dictionary) {
        let mut dict = Dictionary::new();
        dict.load_base(Cursor::new(text), WeightPolicy::Median).unwrap();
        let mut trie = Trie::new();
        for i in 0..dict.len() as u32 {
            trie.insert(&dict.unit(i).word.clone(), i);
        }
        (trie, dict)
    }

    #[test]
    fn prefers_the_dictionary_covering_compound_word() {
        let (trie, dict) = build("他 300 r\n来到 100 v\n网易 50 nt\n杭研 1 n\n大厦 10 n\n来 5 v\n到 5 v\n网 1 n\n易 1 n\n");
        let runes: Vec<char> = "他来到网易杭研大厦".chars().collect();
        let words = cut_mp(&trie, &dict, &runes, 0, runes.len(), 512).unwrap();
        let rendered: Vec<String> = words
            .iter()
            .map(|w| runes[w.left..=w.right].iter().collect())
            .collect();
        assert_eq!(rendered, vec!["他", "来到", "网易", "杭研", "大厦"]);
    }

    #[test]
    fn falls_back_to_single_rune_words_when_dictionary_has_no_match() {
        let (trie, dict) = build("他 10 r\n");
        let runes: Vec<char> = "他去".chars().collect();
        let words = cut_mp(&trie, &dict, &runes, 0, runes.len(), 512).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[1], WordRange::new(1, 1));
    }
}
