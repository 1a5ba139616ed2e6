//! # fenci-core — Chinese-language full-text tokenizer
//!
//! A trie-indexed lexicon plus a maximum-probability DAG segmenter,
//! backed by a four-state hidden Markov model for text the dictionary
//! doesn't cover.
//!
//! ## Pipeline
//!
//! ```text
//! &str → Rune decode → PreFilter split → DAG build → segment strategy → WordRange → &str
//! ```
//!
//! [`facade::Segmenter`] is the entry point: load a base dictionary and an
//! HMM model, then call `cut`, `cut_all`, `cut_for_search`, `cut_hmm`, or
//! `cut_small`.

pub mod config;
pub mod defaults;
pub mod dictionary;
pub mod error;
pub mod facade;
pub mod hmm;
pub mod host;
pub mod pos;
pub mod prefilter;
pub mod rune;
pub mod segment;
pub mod trie;

pub use config::{Config, WeightPolicy};
pub use error::{Error, Result};
pub use facade::{Segmenter, Strategy};
