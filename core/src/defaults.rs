//! A small embedded dictionary and HMM model, curated to cover the
//! worked-example sentences this crate's test suite and CLI exercise.
//! Not a substitute for a production-scale dictionary: callers that need
//! real-world coverage should load their own via
//! [`crate::facade::Segmenter::load_base_dict`].

pub const DICT: &str = include_str!("data/dict.txt");
pub const HMM_MODEL: &str = include_str!("data/hmm_model.txt");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::Segmenter;
    use std::io::Cursor;

    fn default_segmenter() -> Segmenter {
        let mut seg = Segmenter::new();
        seg.load_base_dict(Cursor::new(DICT)).unwrap();
        seg.load_hmm_model(Cursor::new(HMM_MODEL)).unwrap();
        seg
    }

    #[test]
    fn cuts_the_first_worked_example() {
        let seg = default_segmenter();
        let words = seg.cut("他来到网易杭研大厦").unwrap();
        assert_eq!(words, vec!["他", "来到", "网易", "杭研", "大厦"]);
    }

    #[test]
    fn cuts_the_second_worked_example() {
        let seg = default_segmenter();
        let words = seg.cut("小明硕士毕业于中国科学院计算所后在日本京都大学深造").unwrap();
        assert_eq!(
            words,
            vec![
                "小明", "硕士", "毕业", "于", "中国科学院", "计算所", "后", "在", "日本京都大学",
                "深造"
            ]
        );
    }

    #[test]
    fn full_cut_surfaces_overlapping_compounds() {
        let seg = default_segmenter();
        let words = seg.cut_all("我来到北京清华大学").unwrap();
        assert_eq!(
            words,
            vec!["我", "来到", "北京", "清华", "清华大学", "华大", "大学"]
        );
    }

    #[test]
    fn search_cut_includes_mix_words_and_their_dictionary_substrings() {
        let seg = default_segmenter();
        let words = seg.cut_for_search("北京大学").unwrap();
        assert!(words.contains(&"北京".to_string()));
        assert!(words.contains(&"北京大学".to_string()));
    }

    #[test]
    fn hmm_only_cut_covers_ascii_runs_and_cjk_without_a_dictionary() {
        let seg = default_segmenter();
        let words = seg.cut_hmm("iphone5").unwrap();
        assert_eq!(words, vec!["iphone5"]);
    }

    #[test]
    fn cut_small_caps_word_length_even_when_a_longer_dictionary_word_exists() {
        let seg = default_segmenter();
        let capped = seg.cut_small("日本京都大学", 3).unwrap();
        assert!(capped.iter().all(|w| w.chars().count() <= 3));
        let uncapped = seg.cut_small("日本京都大学", 6).unwrap();
        assert_eq!(uncapped, vec!["日本京都大学"]);
    }

    #[test]
    fn tag_assigns_a_pos_to_every_mix_word() {
        let seg = default_segmenter();
        let tagged = seg.tag("他来到网易杭研大厦").unwrap();
        assert_eq!(
            tagged,
            vec![
                ("他".to_string(), "r".to_string()),
                ("来到".to_string(), "v".to_string()),
                ("网易".to_string(), "nt".to_string()),
                ("杭研".to_string(), "nz".to_string()),
                ("大厦".to_string(), "n".to_string()),
            ]
        );
    }
}
