//! Mix segmenter: runs the maximum-probability cut, then re-decodes any
//! run of consecutive single-rune MP output (that isn't a user-registered
//! single-rune word) as one HMM pass over the whole run.

use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::hmm::HmmModel;
use crate::rune::WordRange;
use crate::segment::{hmm_cut, mp};
use crate::trie::Trie;

#[allow(clippy::too_many_arguments)]
pub fn cut_mix(
    trie: &Trie,
    dict: &Dictionary,
    model: &HmmModel,
    runes: &[char],
    begin: usize,
    end: usize,
    hmm: bool,
    max_word_len: usize,
) -> Result<Vec<WordRange>> {
    let words = mp::cut_mp(trie, dict, runes, begin, end, max_word_len)?;
    if !hmm {
        return Ok(words);
    }

    let mut res = Vec::with_capacity(words.len());
    let mut i = 0usize;
    while i < words.len() {
        let w = words[i];
        if w.left != w.right || dict.is_user_single_rune(runes[w.left]) {
            res.push(w);
            i += 1;
            continue;
        }

        let mut j = i;
        while j < words.len()
            && words[j].left == words[j].right
            && !dict.is_user_single_rune(runes[words[j].left])
        {
            j += 1;
        }

        let run_begin = words[i].left;
        let run_end = words[j - 1].left + 1;
        res.extend(hmm_cut::cut_hmm(model, runes, run_begin, run_end));
        i = j;
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightPolicy;
    use std::io::Cursor;

    fn toy_model() -> HmmModel {
        let text = "\
-0.3 -3.14e100 -3.14e100 -1.4
-3.14e100 -0.2 -0.9 -3.14e100
-0.6 -3.14e100 -3.14e100 -0.8
-0.3 -3.14e100 -3.14e100 -1.3
-3.14e100 -3.14e100 -3.14e100 -0.7
京:-1.0,都:-1.0,他:-1.0,去:-1.0
京:-1.0,都:-1.0,他:-1.0,去:-1.0
京:-1.0,都:-1.0,他:-1.0,去:-1.0
京:-0.5,都:-0.5,他:-0.5,去:-0.5
";
        HmmModel::load(Cursor::new(text)).unwrap()
    }

    #[test]
    fn multi_rune_word_passes_through_untouched() {
        let mut dict = Dictionary::new();
        dict.load_base(Cursor::new("他 10 r\n来到 10 v\n"), WeightPolicy::Median).unwrap();
        let mut trie = Trie::new();
        for i in 0..dict.len() as u32 {
            trie.insert(&dict.unit(i).word.clone(), i);
        }
        let model = toy_model();
        let runes: Vec<char> = "他来到".chars().collect();
        let words = cut_mix(&trie, &dict, &model, &runes, 0, runes.len(), true, 512).unwrap();
        // "来到" survives MP as a single two-rune edge and is never a batching
        // candidate; "他" is a base-dict single rune (not a *user* dict
        // single), so it still gets routed through the HMM batch, which for
        // a lone rune can only emit that same rune back out.
        assert_eq!(words, vec![WordRange::new(0, 0), WordRange::new(1, 2)]);
    }

    #[test]
    fn consecutive_unknown_single_runes_are_batched_into_one_hmm_pass() {
        let mut dict = Dictionary::new();
        dict.load_base(Cursor::new("他 10 r\n去 10 v\n来到 10 v\n"), WeightPolicy::Median).unwrap();
        let mut trie = Trie::new();
        for i in 0..dict.len() as u32 {
            trie.insert(&dict.unit(i).word.clone(), i);
        }
        let model = toy_model();
        let runes: Vec<char> = "他去来到".chars().collect();
        let words = cut_mix(&trie, &dict, &model, &runes, 0, runes.len(), true, 512).unwrap();
        // "他去" (two base-dict singles, neither a user single) batch into one
        // HMM pass covering exactly those two runes, followed by "来到"
        // passing through unchanged.
        let batched_len: usize = words
            .iter()
            .take_while(|w| w.left < 2)
            .map(|w| w.len())
            .sum();
        assert_eq!(batched_len, 2);
        assert_eq!(*words.last().unwrap(), WordRange::new(2, 3));
    }

    #[test]
    fn user_single_rune_word_is_not_batched_for_hmm() {
        let mut dict = Dictionary::new();
        dict.load_base(Cursor::new("占位 10 x\n"), WeightPolicy::Median).unwrap();
        dict.load_user(Cursor::new("京\n")).unwrap();
        let mut trie = Trie::new();
        for i in 0..dict.len() as u32 {
            trie.insert(&dict.unit(i).word.clone(), i);
        }
        let model = toy_model();
        let runes: Vec<char> = "京".chars().collect();
        let words = cut_mix(&trie, &dict, &model, &runes, 0, runes.len(), true, 512).unwrap();
        assert_eq!(words, vec![WordRange::new(0, 0)]);
    }
}
