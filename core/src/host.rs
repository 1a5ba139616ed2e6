//! Models the consumer side of a full-text-parser host plugin interface:
//! a fixed lifecycle (`scan_begin` / `next_token` / `scan_end`) plus two
//! capability queries (`add_word_flag`, `is_charset_supported`). This
//! crate does not implement plugin glue or FFI registration — that lives
//! outside this crate, in whatever embeds it — but `FtParserSession`
//! gives such a glue layer a ready `HostTokenSink` to drive.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::facade::Segmenter;

/// `add_word_flag` bits, named after the host interface's `AWF_*` flags.
pub const AWF_STOPWORD: u64 = 1 << 0;
pub const AWF_CASEDOWN: u64 = 1 << 1;
pub const AWF_GROUPBY_WORD: u64 = 1 << 2;

/// One token as the host receives it: a byte pointer (offset + length)
/// into the scanned sentence, a rune count, and a frequency. Frequency is
/// always 1 — this crate never merges duplicate tokens into a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostToken {
    pub byte_offset: usize,
    pub byte_len: usize,
    pub char_count: usize,
    pub freq: u32,
}

/// Returned by `next_token` once no more non-stopword tokens remain for
/// the current scan. Not an `Error` variant: running out of tokens is an
/// expected outcome of iteration, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOutcome {
    Token(HostToken),
    IterEnd,
}

pub trait HostTokenSink {
    /// Cuts `sentence` and resets iteration to its first token.
    fn scan_begin(&mut self, sentence: &str) -> Result<()>;

    /// Advances to and returns the next non-stopword token, or `IterEnd`.
    fn next_token(&mut self) -> Result<TokenOutcome>;

    /// Releases the token buffer built by `scan_begin`.
    fn scan_end(&mut self);

    fn add_word_flag(&self) -> u64;

    /// `Ok(())` for UTF-8/UTF-8MB4; `Err(NotSupported)` for anything else.
    fn is_charset_supported(&self, charset: &str) -> Result<()>;
}

/// Reference `HostTokenSink` over a [`Segmenter`]: cuts the whole sentence
/// up front in `scan_begin`, then hands out tokens one at a time, skipping
/// any word present in `stopwords`.
pub struct FtParserSession<'a> {
    segmenter: &'a Segmenter,
    stopwords: &'a HashSet<String>,
    tokens: Vec<(String, HostToken)>,
    index: isize,
}

impl<'a> FtParserSession<'a> {
    pub fn new(segmenter: &'a Segmenter, stopwords: &'a HashSet<String>) -> Self {
        FtParserSession {
            segmenter,
            stopwords,
            tokens: Vec::new(),
            index: -1,
        }
    }
}

impl<'a> HostTokenSink for FtParserSession<'a> {
    fn scan_begin(&mut self, sentence: &str) -> Result<()> {
        let words = self.segmenter.cut(sentence)?;
        let mut offset = 0usize;
        self.tokens = words
            .into_iter()
            .map(|word| {
                let byte_len = word.len();
                let char_count = word.chars().count();
                let token = HostToken {
                    byte_offset: offset,
                    byte_len,
                    char_count,
                    freq: 1,
                };
                offset += byte_len;
                (word, token)
            })
            .collect();
        self.index = -1;
        Ok(())
    }

    fn next_token(&mut self) -> Result<TokenOutcome> {
        loop {
            self.index += 1;
            let idx = self.index as usize;
            if idx >= self.tokens.len() {
                return Ok(TokenOutcome::IterEnd);
            }
            let (word, token) = &self.tokens[idx];
            if !self.stopwords.contains(word) {
                return Ok(TokenOutcome::Token(*token));
            }
        }
    }

    fn scan_end(&mut self) {
        self.tokens.clear();
        self.index = -1;
    }

    fn add_word_flag(&self) -> u64 {
        AWF_STOPWORD | AWF_CASEDOWN | AWF_GROUPBY_WORD
    }

    fn is_charset_supported(&self, charset: &str) -> Result<()> {
        if charset.eq_ignore_ascii_case("utf8mb4") || charset.eq_ignore_ascii_case("utf8") {
            Ok(())
        } else {
            Err(Error::not_supported(format!("charset {charset} is not supported, only UTF-8")))
        }
    }
}
