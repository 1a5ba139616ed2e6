//! Part-of-speech lookup: an exact dictionary hit wins; otherwise a small
//! heuristic distinguishes "all-digits", "contains a Latin letter", and
//! "no ASCII at all".

use crate::dictionary::Dictionary;
use crate::trie::Trie;

pub const POS_M: &str = "m";
pub const POS_ENG: &str = "eng";
pub const POS_X: &str = "x";

/// Looks up the tag for one already-cut word. Falls back to
/// [`special_rule`] when the word isn't in the dictionary, or is but
/// carries no tag.
pub fn lookup_tag(trie: &Trie, dict: &Dictionary, word: &[char]) -> String {
    match trie.find_exact(word) {
        Some(unit) if !dict.unit(unit).tag.is_empty() => dict.unit(unit).tag.clone(),
        _ => special_rule(word).to_string(),
    }
}

/// Classifies a word with no dictionary tag by its ASCII content: `x` if
/// it has none, `m` if every ASCII rune found is a digit, `eng` otherwise.
/// Scanning stops once half the word has been seen without an ASCII rune,
/// matching the asymmetry of real-world mixed-script tokens (an ASCII
/// prefix or suffix is meaningful; ASCII buried past the midpoint rarely
/// is).
pub fn special_rule(word: &[char]) -> &'static str {
    let mut ascii_count = 0usize;
    let mut digit_count = 0usize;
    let mut i = 0usize;
    while i < word.len() && ascii_count < word.len() / 2 {
        if (word[i] as u32) < 0x80 {
            ascii_count += 1;
            if word[i].is_ascii_digit() {
                digit_count += 1;
            }
        }
        i += 1;
    }
    if ascii_count == 0 {
        POS_X
    } else if digit_count == ascii_count {
        POS_M
    } else {
        POS_ENG
    }
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
    fn dictionary_tag_wins_when_present() {
        let (trie, dict) = build("来到 10 v\n");
        let word: Vec<char> = "来到".chars().collect();
        assert_eq!(lookup_tag(&trie, &dict, &word), "v");
    }

    #[test]
    fn all_digit_word_tags_as_m() {
        assert_eq!(special_rule(&"2024".chars().collect::<Vec<_>>()), POS_M);
    }

    #[test]
    fn mixed_ascii_word_tags_as_eng() {
        assert_eq!(special_rule(&"ab12".chars().collect::<Vec<_>>()), POS_ENG);
    }

    #[test]
    fn pure_non_ascii_untagged_word_is_x() {
        let (trie, dict) = build("占位 10 x\n");
        let word: Vec<char> = "未登录".chars().collect();
        assert_eq!(lookup_tag(&trie, &dict, &word), POS_X);
    }
}
