//! Lexicon storage: an append-only arena of [`DictUnit`]s plus the derived
//! weight statistics used when a user word omits a frequency.
//!
//! The trie (`trie.rs`) never stores a reference into this arena, only a
//! `u32` index, so growing the `Vec` on insertion can never invalidate
//! anything the trie already holds.

use std::collections::HashSet;
use std::io::BufRead;

use crate::config::WeightPolicy;
use crate::error::{Error, Result};

/// One lexicon entry: a word's rune sequence, its log-probability weight,
/// and a (possibly empty) part-of-speech tag.
#[derive(Debug, Clone)]
pub struct DictUnit {
    pub word: Vec<char>,
    pub weight: f64,
    pub tag: String,
}

#[derive(Debug, Default)]
pub struct Dictionary {
    units: Vec<DictUnit>,
    freq_sum: f64,
    min_weight: f64,
    max_weight: f64,
    median_weight: f64,
    user_default_weight: f64,
    user_single_runes: HashSet<char>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary::default()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit(&self, index: u32) -> &DictUnit {
        &self.units[index as usize]
    }

    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    pub fn is_user_single_rune(&self, ch: char) -> bool {
        self.user_single_runes.contains(&ch)
    }

    /// Parses the base dictionary: one `word freq tag` line per entry,
    /// exactly 3 whitespace-separated fields. Computes the frequency sum,
    /// normalises every weight to `ln(freq / sum)`, and derives min/median/
    /// max weight statistics from the result.
    pub fn load_base<R: BufRead>(&mut self, reader: R, policy: WeightPolicy) -> Result<()> {
        let mut parsed: Vec<(Vec<char>, f64, String)> = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                Error::invalid_input(format!("io error reading base dict line {}: {e}", lineno + 1))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                log::warn!(
                    "rejecting base dict line {}: expected 3 fields, got {}",
                    lineno + 1,
                    fields.len()
                );
                return Err(Error::invalid_input(format!(
                    "base dict line {} has {} fields, expected 3",
                    lineno + 1,
                    fields.len()
                )));
            }
            let raw_freq: f64 = fields[1].parse().map_err(|_| {
                log::warn!("rejecting base dict line {}: non-numeric frequency {:?}", lineno + 1, fields[1]);
                Error::invalid_input(format!("base dict line {} has non-numeric frequency", lineno + 1))
            })?;
            if raw_freq <= 0.0 {
                log::warn!("rejecting base dict line {}: non-positive frequency {raw_freq}", lineno + 1);
                return Err(Error::invalid_input(format!(
                    "base dict line {} has non-positive frequency",
                    lineno + 1
                )));
            }
            parsed.push((fields[0].chars().collect(), raw_freq, fields[2].to_string()));
        }
        if parsed.is_empty() {
            return Err(Error::invalid_input("base dictionary has no entries"));
        }
        let sum: f64 = parsed.iter().map(|(_, f, _)| f).sum();
        if sum <= 0.0 {
            return Err(Error::invalid_input("base dictionary frequency sum is not positive"));
        }

        self.units.clear();
        self.units.reserve(parsed.len());
        for (word, raw_freq, tag) in parsed {
            self.units.push(DictUnit {
                word,
                weight: (raw_freq / sum).ln(),
                tag,
            });
        }
        self.freq_sum = sum;

        let mut weights: Vec<f64> = self.units.iter().map(|u| u.weight).collect();
        weights.sort_by(|a, b| a.partial_cmp(b).expect("weights are never NaN"));
        self.min_weight = weights[0];
        self.max_weight = weights[weights.len() - 1];
        // Preserved from reference behaviour: the element at index n/2, not
        // the averaged median for an even-length list.
        self.median_weight = weights[weights.len() / 2];
        self.user_default_weight = match policy {
            WeightPolicy::Min => self.min_weight,
            WeightPolicy::Median => self.median_weight,
            WeightPolicy::Max => self.max_weight,
        };
        log::trace!("loaded base dictionary: {} entries", self.units.len());
        Ok(())
    }

    /// Parses a user dictionary: 1, 2, or 3 whitespace-separated fields per
    /// line. Returns the arena indices of the inserted units so the caller
    /// can register them in the trie.
    pub fn load_user<R: BufRead>(&mut self, reader: R) -> Result<Vec<u32>> {
        let mut indices = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                Error::invalid_input(format!("io error reading user dict line {}: {e}", lineno + 1))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let (word_s, weight, tag) = match fields.len() {
                1 => (fields[0], self.user_default_weight, String::new()),
                2 => (fields[0], self.user_default_weight, fields[1].to_string()),
                3 => {
                    if self.freq_sum <= 0.0 {
                        return Err(Error::invalid_input(
                            "user dictionary loaded before base dictionary",
                        ));
                    }
                    let freq: f64 = fields[1].parse().map_err(|_| {
                        log::warn!("rejecting user dict line {}: non-numeric frequency", lineno + 1);
                        Error::invalid_input(format!(
                            "user dict line {} has non-numeric frequency",
                            lineno + 1
                        ))
                    })?;
                    (fields[0], (freq / self.freq_sum).ln(), fields[2].to_string())
                }
                n => {
                    log::warn!("rejecting user dict line {}: {} fields, expected 1, 2 or 3", lineno + 1, n);
                    return Err(Error::invalid_input(format!(
                        "user dict line {} has {} fields, expected 1, 2 or 3",
                        lineno + 1,
                        n
                    )));
                }
            };
            let word: Vec<char> = word_s.chars().collect();
            if word.len() == 1 {
                self.user_single_runes.insert(word[0]);
            }
            let index = self.units.len() as u32;
            self.units.push(DictUnit { word, weight, tag });
            indices.push(index);
        }
        Ok(indices)
    }

    /// Inserts one word programmatically, mirroring the facade's
    /// `insert_user_word`. `freq` of `None` (or `Some(0)`) falls back to the
    /// configured user-word weight policy.
    pub fn insert_user_word(&mut self, word: &str, freq: Option<u64>, tag: Option<&str>) -> Result<u32> {
        if word.is_empty() {
            return Err(Error::invalid_input("cannot insert an empty word"));
        }
        let weight = match freq {
            Some(f) if f > 0 => ((f as f64) / self.freq_sum).ln(),
            _ => self.user_default_weight,
        };
        let chars: Vec<char> = word.chars().collect();
        if chars.len() == 1 {
            self.user_single_runes.insert(chars[0]);
        }
        let index = self.units.len() as u32;
        self.units.push(DictUnit {
            word: chars,
            weight,
            tag: tag.unwrap_or("").to_string(),
        });
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.load_base(Cursor::new(text), WeightPolicy::Median).unwrap();
        dict
    }

    #[test]
    fn weights_sum_to_one_after_normalisation() {
        let dict = load("他 3 r\n来到 2 v\n了 5 u\n");
        let sum: f64 = (0..dict.len()).map(|i| dict.unit(i as u32).weight.exp()).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_wrong_column_count() {
        let mut dict = Dictionary::new();
        let err = dict
            .load_base(Cursor::new("他 3\n"), WeightPolicy::Median)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn rejects_non_positive_frequency() {
        let mut dict = Dictionary::new();
        let err = dict
            .load_base(Cursor::new("他 0 r\n"), WeightPolicy::Median)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn user_dict_single_rune_is_tracked() {
        let mut dict = load("他 3 r\n");
        dict.load_user(Cursor::new("的\n")).unwrap();
        assert!(dict.is_user_single_rune('的'));
        assert!(!dict.is_user_single_rune('他'));
    }

    #[test]
    fn user_dict_three_field_line_uses_explicit_frequency() {
        let mut dict = load("他 3 r\n来到 2 v\n");
        let indices = dict.load_user(Cursor::new("杭研 1 n\n")).unwrap();
        let unit = dict.unit(indices[0]);
        assert_eq!(unit.tag, "n");
        assert!((unit.weight - (1.0_f64 / 5.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn insert_user_word_without_freq_uses_default_policy_weight() {
        let mut dict = load("他 3 r\n来到 2 v\n了 5 u\n");
        let median = dict.median_weight;
        let idx = dict.insert_user_word("杭研", None, None).unwrap();
        assert_eq!(dict.unit(idx).weight, median);
    }
}
