//! Query segmenter: runs the mix cut, then additionally emits every
//! qualifying 2-gram and 3-gram substring of each sufficiently long mix
//! word, for search-index-style recall.

use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::hmm::HmmModel;
use crate::rune::WordRange;
use crate::segment::mix;
use crate::trie::Trie;

#[allow(clippy::too_many_arguments)]
pub fn cut_query(
    trie: &Trie,
    dict: &Dictionary,
    model: &HmmModel,
    runes: &[char],
    begin: usize,
    end: usize,
    hmm: bool,
    max_word_len: usize,
) -> Result<Vec<WordRange>> {
    let mix_res = mix::cut_mix(trie, dict, model, runes, begin, end, hmm, max_word_len)?;
    let mut out = Vec::with_capacity(mix_res.len());

    for word in mix_res {
        let len = word.len();
        if len > 2 {
            for i in 0..len - 1 {
                let l = word.left + i;
                let r = l + 1;
                if trie.find_exact(&runes[l..=r]).is_some() {
                    out.push(WordRange::new(l, r));
                }
            }
        }
        if len > 3 {
            for i in 0..len - 2 {
                let l = word.left + i;
                let r = l + 2;
                if trie.find_exact(&runes[l..=r]).is_some() {
                    out.push(WordRange::new(l, r));
                }
            }
        }
        out.push(word);
    }
    Ok(out)
}
