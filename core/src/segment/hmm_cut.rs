//! HMM-only segmenter: ASCII runs are glued by simple letter/number rules;
//! everything else is cut by Viterbi decoding over the four-state model.

use crate::hmm::HmmModel;
use crate::rune::WordRange;

/// Cuts `[begin, end)`, alternating ASCII-run handling with Viterbi
/// decoding of the surrounding non-ASCII spans.
pub fn cut_hmm(model: &HmmModel, runes: &[char], begin: usize, end: usize) -> Vec<WordRange> {
    let mut res = Vec::new();
    let mut left = begin;
    let mut right = begin;

    while right < end {
        if (runes[right] as u32) < 0x80 {
            if left != right {
                internal_cut(model, runes, left, right, &mut res);
            }
            left = right;
            right = sequential_letter_rule(runes, left, end);
            if right == left {
                right = numbers_rule(runes, left, end);
            }
            if right == left {
                right = left + 1;
            }
            res.push(WordRange::new(left, right - 1));
            left = right;
        } else {
            right += 1;
        }
    }
    if left != right {
        internal_cut(model, runes, left, right, &mut res);
    }
    res
}

fn sequential_letter_rule(runes: &[char], begin: usize, end: usize) -> usize {
    if begin >= end || !runes[begin].is_ascii_alphabetic() {
        return begin;
    }
    let mut i = begin + 1;
    while i < end && (runes[i].is_ascii_alphabetic() || runes[i].is_ascii_digit()) {
        i += 1;
    }
    i
}

fn numbers_rule(runes: &[char], begin: usize, end: usize) -> usize {
    if begin >= end || !runes[begin].is_ascii_digit() {
        return begin;
    }
    let mut i = begin + 1;
    while i < end && (runes[i].is_ascii_digit() || runes[i] == '.') {
        i += 1;
    }
    i
}

fn internal_cut(model: &HmmModel, runes: &[char], begin: usize, end: usize, res: &mut Vec<WordRange>) {
    let states = model.viterbi(&runes[begin..end]);
    let mut left = begin;
    for (i, &state) in states.iter().enumerate() {
        if state % 2 == 1 {
            let right = begin + i + 1;
            res.push(WordRange::new(left, right - 1));
            left = right;
        }
    }
}
