//! The top-level entry point: owns the dictionary, trie, and HMM model,
//! and dispatches `cut`/`cut_all`/`cut_for_search`/`cut_hmm`/`cut_small`
//! to the matching strategy in `crate::segment`.

use std::io::BufRead;

use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::hmm::HmmModel;
use crate::pos;
use crate::prefilter;
use crate::rune::{decode_str, Rune, WordRange};
use crate::segment::{full, hmm_cut, mix, mp, query};
use crate::trie::Trie;

/// Which cutting strategy a request should use. The facade methods are
/// thin named wrappers over `cut_with`; this exists for callers (like the
/// CLI) that pick a strategy at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Mp,
    Hmm,
    Mix,
    Full,
    Query,
}

#[derive(Debug, Default)]
pub struct Segmenter {
    config: Config,
    dict: Dictionary,
    trie: Trie,
    model: HmmModel,
    dict_loaded: bool,
    model_loaded: bool,
}

impl Segmenter {
    pub fn new() -> Self {
        Segmenter::default()
    }

    /// Loads the base dictionary and builds the trie from it. Both this
    /// and [`Segmenter::load_hmm_model`] must be called before any `cut*`
    /// method.
    pub fn load_base_dict<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.dict
            .load_base(reader, self.config.user_word_weight_policy)?;
        self.rebuild_trie();
        self.dict_loaded = self.dict_loaded || !self.dict.is_empty();
        Ok(())
    }

    /// Loads the HMM model. Both this and [`Segmenter::load_base_dict`]
    /// must be called before any `cut*` method.
    pub fn load_hmm_model<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.model = HmmModel::load(reader)?;
        self.model_loaded = true;
        Ok(())
    }

    pub fn load_user_dict<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let indices = self.dict.load_user(reader)?;
        for index in indices {
            self.trie.insert(&self.dict.unit(index).word.clone(), index);
        }
        Ok(())
    }

    pub fn reset_separators(&mut self, separators: &str) {
        self.config.reset_separators(separators);
    }

    pub fn insert_user_word(&mut self, word: &str, freq: Option<u64>, tag: Option<&str>) -> Result<()> {
        let index = self.dict.insert_user_word(word, freq, tag)?;
        self.trie.insert(&self.dict.unit(index).word.clone(), index);
        Ok(())
    }

    pub fn delete_user_word(&mut self, word: &str) {
        let runes: Vec<char> = word.chars().collect();
        self.trie.remove(&runes);
    }

    /// Exact dictionary lookup: `Some(tag)` if `word` is a known word,
    /// `None` otherwise.
    pub fn find(&self, word: &str) -> Option<&str> {
        let runes: Vec<char> = word.chars().collect();
        self.trie
            .find_exact(&runes)
            .map(|unit| self.dict.unit(unit).tag.as_str())
    }

    /// Mix cut (`hmm = true`): the default, general-purpose strategy.
    pub fn cut(&self, sentence: &str) -> Result<Vec<String>> {
        self.cut_with(sentence, Strategy::Mix)
    }

    /// Full cut: every dictionary word found anywhere in the DAG.
    pub fn cut_all(&self, sentence: &str) -> Result<Vec<String>> {
        self.cut_with(sentence, Strategy::Full)
    }

    /// Query cut: mix plus qualifying 2-/3-gram substrings, for search
    /// indexing.
    pub fn cut_for_search(&self, sentence: &str) -> Result<Vec<String>> {
        self.cut_with(sentence, Strategy::Query)
    }

    /// HMM-only cut, bypassing the dictionary entirely except for the
    /// ASCII glue rules.
    pub fn cut_hmm(&self, sentence: &str) -> Result<Vec<String>> {
        self.cut_with(sentence, Strategy::Hmm)
    }

    /// Maximum-probability cut with a caller-supplied word-length cap.
    pub fn cut_small(&self, sentence: &str, max_word_len: usize) -> Result<Vec<String>> {
        self.require_initialized("cut_small")?;
        let runes = decode_str(sentence);
        self.check_input_size(&runes)?;
        let chars: Vec<char> = runes.iter().map(|r| r.ch).collect();
        let mut words = Vec::new();
        for (start, end) in prefilter::PreFilter::new(&self.config.separators, &chars) {
            words.extend(mp::cut_mp(&self.trie, &self.dict, &chars, start, end, max_word_len)?);
        }
        Ok(self.render(&words, &runes, sentence))
    }

    /// Runs `strategy` over `sentence`, returning the matched word
    /// substrings in order.
    pub fn cut_with(&self, sentence: &str, strategy: Strategy) -> Result<Vec<String>> {
        self.require_initialized("cut")?;
        let runes = decode_str(sentence);
        self.check_input_size(&runes)?;
        let chars: Vec<char> = runes.iter().map(|r| r.ch).collect();
        let mut words = Vec::new();
        for (start, end) in prefilter::PreFilter::new(&self.config.separators, &chars) {
            let max_word_len = self.config.max_word_len;
            let mut piece = match strategy {
                Strategy::Mp => mp::cut_mp(&self.trie, &self.dict, &chars, start, end, max_word_len)?,
                Strategy::Hmm => hmm_cut::cut_hmm(&self.model, &chars, start, end),
                Strategy::Mix => {
                    mix::cut_mix(&self.trie, &self.dict, &self.model, &chars, start, end, true, max_word_len)?
                }
                Strategy::Full => full::cut_full(&self.trie, &self.dict, &chars, start, end, max_word_len),
                Strategy::Query => {
                    query::cut_query(&self.trie, &self.dict, &self.model, &chars, start, end, true, max_word_len)?
                }
            };
            words.append(&mut piece);
        }
        Ok(self.render(&words, &runes, sentence))
    }

    /// Tags every mix-cut word of `sentence` with its part of speech.
    pub fn tag(&self, sentence: &str) -> Result<Vec<(String, String)>> {
        self.require_initialized("tag")?;
        let runes = decode_str(sentence);
        self.check_input_size(&runes)?;
        let chars: Vec<char> = runes.iter().map(|r| r.ch).collect();
        let mut out = Vec::new();
        for (start, end) in prefilter::PreFilter::new(&self.config.separators, &chars) {
            let words = mix::cut_mix(
                &self.trie,
                &self.dict,
                &self.model,
                &chars,
                start,
                end,
                true,
                self.config.max_word_len,
            )?;
            for w in words {
                let slice = &chars[w.left..=w.right];
                let text: String = slice.iter().collect();
                let tag = pos::lookup_tag(&self.trie, &self.dict, slice);
                out.push((text, tag));
            }
        }
        Ok(out)
    }

    fn require_initialized(&self, operation: &str) -> Result<()> {
        if self.dict_loaded && self.model_loaded {
            Ok(())
        } else {
            Err(Error::not_initialized(operation))
        }
    }

    /// Rejects input longer than `config.max_input_runes` before any
    /// DAG/Viterbi work is done over it.
    fn check_input_size(&self, runes: &[Rune]) -> Result<()> {
        if runes.len() > self.config.max_input_runes {
            Err(Error::out_of_memory(format!(
                "input has {} runes, exceeding the configured limit of {}",
                runes.len(),
                self.config.max_input_runes
            )))
        } else {
            Ok(())
        }
    }

    fn rebuild_trie(&mut self) {
        let mut trie = Trie::new();
        for i in 0..self.dict.len() as u32 {
            trie.insert(&self.dict.unit(i).word.clone(), i);
        }
        self.trie = trie;
    }

    fn render(&self, words: &[WordRange], runes: &[Rune], sentence: &str) -> Vec<String> {
        words
            .iter()
            .map(|w| w.as_str(runes, sentence).to_string())
            .collect()
    }
}
