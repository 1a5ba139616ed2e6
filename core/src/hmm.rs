//! The four-state hidden Markov model (`B`egin, `E`nd, `M`iddle, `S`ingle)
//! used to recover word boundaries in text the dictionary doesn't cover,
//! and its Viterbi decoder.

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::{Error, Result};

/// Sentinel for an unseen emission. Kept as a finite constant rather than
/// `f64::NEG_INFINITY` so that summing log-probabilities never produces
/// `NaN`.
pub const MIN_DOUBLE: f64 = -3.14e100;

/// One of the four HMM states, carrying its flat-array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmmState {
    B,
    E,
    M,
    S,
}

impl HmmState {
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            HmmState::B => 0,
            HmmState::E => 1,
            HmmState::M => 2,
            HmmState::S => 3,
        }
    }

    pub fn from_index(i: usize) -> Self {
        match i {
            0 => HmmState::B,
            1 => HmmState::E,
            2 => HmmState::M,
            3 => HmmState::S,
            _ => panic!("hmm state index out of range: {i}"),
        }
    }

    /// `true` for `E` and `S`: the two states a word may legally end on.
    /// Equivalently, the state index is odd.
    pub fn is_boundary(self) -> bool {
        self.index() % 2 == 1
    }
}

#[derive(Debug, Clone)]
pub struct HmmModel {
    start: [f64; HmmState::COUNT],
    trans: [[f64; HmmState::COUNT]; HmmState::COUNT],
    emit: [HashMap<char, f64>; HmmState::COUNT],
}

impl Default for HmmModel {
    fn default() -> Self {
        HmmModel {
            start: [MIN_DOUBLE; HmmState::COUNT],
            trans: [[MIN_DOUBLE; HmmState::COUNT]; HmmState::COUNT],
            emit: Default::default(),
        }
    }
}

impl HmmModel {
    pub fn emit_prob(&self, state: usize, ch: char) -> f64 {
        *self.emit[state].get(&ch).unwrap_or(&MIN_DOUBLE)
    }

    pub fn start_prob(&self, state: usize) -> f64 {
        self.start[state]
    }

    pub fn trans_prob(&self, from: usize, to: usize) -> f64 {
        self.trans[from][to]
    }

    /// Loads a model file: a start-probability line, four transition rows,
    /// and four emission maps, in that order (states `B, E, M, S`). Blank
    /// lines and `#`-prefixed lines are ignored.
    pub fn load<R: BufRead>(reader: R) -> Result<Self> {
        let mut lineno = 0usize;
        let mut lines = reader.lines();

        let start_line = next_content_line(&mut lines, &mut lineno)?
            .ok_or_else(|| Error::invalid_input("hmm model file is missing the start-probability line"))?;
        let start_vals = parse_floats(&start_line, lineno, "start-probability")?;

        let mut trans = [[0.0; HmmState::COUNT]; HmmState::COUNT];
        for row in trans.iter_mut() {
            let line = next_content_line(&mut lines, &mut lineno)?
                .ok_or_else(|| Error::invalid_input("hmm model file is missing a transition row"))?;
            let vals = parse_floats(&line, lineno, "transition")?;
            row.copy_from_slice(&vals);
        }

        let mut emit: [HashMap<char, f64>; HmmState::COUNT] = Default::default();
        for slot in emit.iter_mut() {
            let line = next_content_line(&mut lines, &mut lineno)?
                .ok_or_else(|| Error::invalid_input("hmm model file is missing an emission line"))?;
            *slot = parse_emission(&line, lineno)?;
        }

        let mut start = [0.0; HmmState::COUNT];
        start.copy_from_slice(&start_vals);
        Ok(HmmModel { start, trans, emit })
    }

    /// Decodes the most probable `{B,E,M,S}` state sequence for `runes`
    /// using flat `4×N` score/predecessor arrays rather than a
    /// matrix-of-vectors.
    pub fn viterbi(&self, runes: &[char]) -> Vec<usize> {
        let x = runes.len();
        assert!(x > 0, "viterbi requires a non-empty rune span");
        let y = HmmState::COUNT;
        let mut weight = vec![0.0f64; x * y];
        let mut path = vec![0usize; x * y];

        for state in 0..y {
            weight[state] = self.start[state] + self.emit_prob(state, runes[0]);
        }

        for i in 1..x {
            for state in 0..y {
                let emit = self.emit_prob(state, runes[i]);
                let mut best = MIN_DOUBLE;
                let mut best_prev = 0usize;
                for prev in 0..y {
                    let score = weight[(i - 1) * y + prev] + self.trans[prev][state] + emit;
                    if score > best {
                        best = score;
                        best_prev = prev;
                    }
                }
                weight[i * y + state] = best;
                path[i * y + state] = best_prev;
            }
        }

        let end_e = weight[(x - 1) * y + HmmState::E.index()];
        let end_s = weight[(x - 1) * y + HmmState::S.index()];
        let mut state = if end_e >= end_s { HmmState::E.index() } else { HmmState::S.index() };

        let mut states = vec![0usize; x];
        for i in (0..x).rev() {
            states[i] = state;
            state = path[i * y + state];
        }
        states
    }
}

fn next_content_line<B: BufRead>(
    lines: &mut std::io::Lines<B>,
    lineno: &mut usize,
) -> Result<Option<String>> {
    for line in lines.by_ref() {
        *lineno += 1;
        let line = line.map_err(|e| {
            Error::invalid_input(format!("io error reading hmm model line {lineno}: {e}"))
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        return Ok(Some(trimmed.to_string()));
    }
    Ok(None)
}

fn parse_floats(line: &str, lineno: usize, kind: &str) -> Result<Vec<f64>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != HmmState::COUNT {
        log::warn!(
            "rejecting hmm model {kind} line {lineno}: expected {} fields, got {}",
            HmmState::COUNT,
            fields.len()
        );
        return Err(Error::invalid_input(format!(
            "hmm model {kind} line {lineno} has {} fields, expected {}",
            fields.len(),
            HmmState::COUNT
        )));
    }
    fields
        .iter()
        .map(|f| {
            f.parse::<f64>().map_err(|_| {
                log::warn!("rejecting hmm model {kind} line {lineno}: non-numeric value {f:?}");
                Error::invalid_input(format!("hmm model {kind} line {lineno} has a non-numeric value"))
            })
        })
        .collect()
}

fn parse_emission(line: &str, lineno: usize) -> Result<HashMap<char, f64>> {
    let mut map = HashMap::new();
    for entry in line.split(',') {
        let mut parts = entry.splitn(2, ':');
        let (rune_s, prob_s) = match (parts.next(), parts.next()) {
            (Some(r), Some(p)) => (r, p),
            _ => {
                log::warn!("rejecting hmm model emission line {lineno}: malformed entry {entry:?}");
                return Err(Error::invalid_input(format!(
                    "hmm model emission line {lineno} has a malformed entry"
                )));
            }
        };
        let mut chars = rune_s.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                log::warn!("rejecting hmm model emission line {lineno}: key is not one codepoint: {rune_s:?}");
                return Err(Error::invalid_input(format!(
                    "hmm model emission line {lineno} has a key that is not exactly one codepoint"
                )));
            }
        };
        let prob: f64 = prob_s.parse().map_err(|_| {
            log::warn!("rejecting hmm model emission line {lineno}: non-numeric probability {prob_s:?}");
            Error::invalid_input(format!(
                "hmm model emission line {lineno} has a non-numeric probability"
            ))
        })?;
        map.insert(ch, prob);
    }
    Ok(map)
}
