//! Integration tests for PatternTrie matching semantics

use sensitive_filter_r::{parse_word_list, PatternTrie, TextMatcher};

/// A small mixed word list: ASCII, overlapping prefixes, CJK
fn get_word_list() -> Vec<String> {
    parse_word_list(
        "
badword
ab
abc
bcd
aa
敏感
敏感词
违禁品
",
    )
}

#[test]
fn test_scenario_single_word() {
    let trie = PatternTrie::from_words(["badword"]);
    assert_eq!(
        trie.detect("this is a badword here").word.as_deref(),
        Some("badword")
    );
    assert!(trie.detect("this is a badword here").found);
}

#[test]
fn test_scenario_prefix_shares_start() {
    let trie = PatternTrie::from_words(["ab", "abc"]);
    assert_eq!(
        trie.contains_match("xxabcxx"),
        Some("ab"),
        "shortest completed pattern at the start position wins"
    );
}

#[test]
fn test_scenario_empty_pattern_set() {
    let trie = PatternTrie::from_words(Vec::<String>::new());
    for text in ["", "anything", "badword", "敏感词"] {
        assert_eq!(trie.contains_match(text), None);
        assert!(trie.find_all_matches(text).is_empty());
    }
}

#[test]
fn test_scenario_overlapping_starts() {
    let trie = PatternTrie::from_words(["aa"]);
    assert_eq!(trie.find_all_matches("aaaa"), vec!["aa"]);
    let starts: Vec<usize> = trie.match_spans("aaaa").iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0, 1, 2]);
}

#[test]
fn test_no_match_in_clean_texts() {
    let trie = PatternTrie::from_words(get_word_list());

    let clean = [
        "",
        "a",
        "b c d",
        "BADWORD",
        "bad word",
        "敏 感",
        "违禁",
        "the quick brown fox",
    ];
    for text in clean {
        assert_eq!(trie.contains_match(text), None, "{:?} should not match", text);
        assert!(trie.find_all_matches(text).is_empty());
    }
}

#[test]
fn test_first_match_is_earliest_start() {
    let trie = PatternTrie::from_words(get_word_list());

    assert_eq!(trie.contains_match("zz bcd then badword"), Some("bcd"));
    assert_eq!(trie.contains_match("这里有违禁品和敏感词"), Some("违禁品"));
    assert_eq!(trie.contains_match("这是敏感词"), Some("敏感"));
}

#[test]
fn test_find_all_results_are_inserted_substrings() {
    let words = get_word_list();
    let trie = PatternTrie::from_words(&words);

    let texts = [
        "abcd aaa badword 敏感词 违禁品 abc",
        "aaaaaaaa",
        "xabcdx",
        "敏感敏感敏感",
    ];
    for text in texts {
        let found = trie.find_all_matches(text);

        let mut unique = found.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), found.len(), "duplicates in {:?}", found);

        for word in found {
            assert!(text.contains(word), "{:?} not in {:?}", word, text);
            assert!(words.iter().any(|w| w == word), "{:?} not a pattern", word);
        }
    }
}

#[test]
fn test_find_all_overlapping_from_different_starts() {
    let trie = PatternTrie::from_words(get_word_list());
    // start 0 -> "ab" (not "abc"), start 1 -> "bcd"
    assert_eq!(trie.find_all_matches("abcd"), vec!["ab", "bcd"]);
}

#[test]
fn test_mask_covers_all_spans() {
    let trie = PatternTrie::from_words(get_word_list());

    assert_eq!(trie.mask("abcd!", '*'), "****!");
    assert_eq!(trie.mask("这是敏感词", '*'), "这是**词");
    assert_eq!(trie.mask("nothing", '*'), "nothing");

    let text = "xx badword aaa 违禁品";
    assert_eq!(
        trie.mask(text, '#').chars().count(),
        text.chars().count()
    );
}
