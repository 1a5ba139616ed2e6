//! The five cutting strategies, all built on the same DAG (`crate::trie`)
//! and dictionary (`crate::dictionary`): maximum-probability, HMM-only,
//! mix, full, and query.

pub mod full;
pub mod hmm_cut;
pub mod mix;
pub mod mp;
pub mod query;
