use cov_mark::check;

use crate::chars::Char;
use crate::score::{BONUS_CAMEL123, BONUS_CONSECUTIVE, BONUS_FIRST_CHAR_MULTIPLIER, PENALTY_GAP_START, SCORE_MATCH};
use crate::utf32_str::Utf32Str;
use crate::{Matcher, MatcherConfig};

use Algorithm::*;

#[derive(Debug, Clone, Copy)]
enum Algorithm {
    FuzzyOptimal,
    FuzzyGreedy,
    Substring,
}

fn assert_matches(algorithm: &[Algorithm], config: MatcherConfig, cases: &[(&str, &str, &[u32], u16)]) {
    let mut matcher = Matcher::new(config);
    let mut matched_indices = Vec::new();
    let mut needle_buf = Vec::new();
    let mut haystack_buf = Vec::new();
    for &(haystack, needle, indices, mut score) in cases {
        let needle_lower;
        let needle = if config.ignore_case {
            needle_lower = needle.to_lowercase();
            &needle_lower
        } else {
            needle
        };
        let needle = Utf32Str::new(needle, &mut needle_buf);
        let haystack = Utf32Str::new(haystack, &mut haystack_buf);
        score += needle.len() as u16 * SCORE_MATCH;
        for &algo in algorithm {
            matched_indices.clear();
            let res = match algo {
                FuzzyOptimal => matcher.fuzzy_indices(haystack, needle, &mut matched_indices),
                FuzzyGreedy => matcher.fuzzy_indices_greedy(haystack, needle, &mut matched_indices),
                Substring => matcher.substring_indices(haystack, needle, &mut matched_indices),
            };
            let match_chars: Vec<_> = matched_indices.iter().map(|&i| haystack.get(i).normalize(&matcher.config)).collect();
            let needle_chars: Vec<_> = needle.chars().collect();

            assert_eq!(res, Some(score), "{needle:?} did not match {haystack:?} ({algo:?})");
            assert_eq!(matched_indices, indices, "{needle:?} match {haystack:?} ({algo:?})");
            assert_eq!(match_chars, needle_chars, "{needle:?} match {haystack:?} indices wrong ({algo:?})");
        }
    }
}

fn assert_not_matches(config: MatcherConfig, cases: &[(&str, &str)]) {
    let mut matcher = Matcher::new(config);
    let mut needle_buf = Vec::new();
    let mut haystack_buf = Vec::new();
    for &(haystack, needle) in cases {
        let needle_lower;
        let needle = if config.ignore_case {
            needle_lower = needle.to_lowercase();
            &needle_lower
        } else {
            needle
        };
        let needle = Utf32Str::new(needle, &mut needle_buf);
        let haystack = Utf32Str::new(haystack, &mut haystack_buf);
        assert_eq!(matcher.fuzzy_match(haystack, needle), None, "{needle:?} should not match {haystack:?}");
        assert_eq!(matcher.fuzzy_match_greedy(haystack, needle), None, "{needle:?} should not match {haystack:?} (greedy)");
    }
}

const BONUS_BOUNDARY_WHITE: u16 = MatcherConfig::DEFAULT.bonus_boundary_white;

#[test]
fn prefiltered_window_exactly_the_needle_length_skips_the_dp() {
    // when the prefiltered window is no wider than the needle itself the
    // match is forced contiguous, so the optimal path short-circuits into
    // the exact-match scorer instead of allocating a DP matrix.
    check!(small_haystack);
    let mut matcher = Matcher::new(MatcherConfig::DEFAULT);
    let mut buf = Vec::new();
    let mut needle_buf = Vec::new();
    let haystack = Utf32Str::new("xfoobary", &mut buf);
    let needle = Utf32Str::new("foobar", &mut needle_buf);
    assert!(matcher.fuzzy_match(haystack, needle).is_some());
}

#[test]
fn fuzzy_matches_with_gaps() {
    assert_matches(
        &[FuzzyGreedy, FuzzyOptimal],
        MatcherConfig::DEFAULT,
        &[
            ("fooBarbaz1", "obr", &[2, 3, 5], BONUS_CONSECUTIVE - PENALTY_GAP_START),
            ("fooBarbaz1", "br", &[3, 5], BONUS_CAMEL123 * BONUS_FIRST_CHAR_MULTIPLIER - PENALTY_GAP_START),
            ("foo bar baz", "fbb", &[0, 4, 8], BONUS_BOUNDARY_WHITE * BONUS_FIRST_CHAR_MULTIPLIER * 2),
        ],
    );
}

#[test]
fn fuzzy_rejects_out_of_order_needle() {
    assert_not_matches(MatcherConfig::DEFAULT, &[("foo", "oof"), ("needlefind", "fdln")]);
}

#[test]
fn smart_case_is_applied_per_atom_casing() {
    let mixed_case = MatcherConfig { ignore_case: false, ..MatcherConfig::DEFAULT };
    assert_matches(&[FuzzyOptimal], mixed_case, &[("FooBar", "FB", &[0, 3], BONUS_CAMEL123 * BONUS_FIRST_CHAR_MULTIPLIER)]);
    assert_not_matches(mixed_case, &[("foobar", "FB")]);
}

#[test]
fn substring_requires_contiguous_run() {
    assert_matches(&[Substring], MatcherConfig::DEFAULT, &[("fooBarbaz", "bar", &[3, 4, 5], BONUS_CAMEL123 * BONUS_FIRST_CHAR_MULTIPLIER)]);
    let mut matcher = Matcher::new(MatcherConfig::DEFAULT);
    let mut buf = (Vec::new(), Vec::new());
    let haystack = Utf32Str::new("fooBarbaz", &mut buf.0);
    let needle = Utf32Str::new("obr", &mut buf.1);
    assert_eq!(matcher.substring_match(haystack, needle), None);
}

#[test]
fn normalize_folds_diacritics() {
    let config = MatcherConfig { normalize: true, ..MatcherConfig::DEFAULT };
    let mut matcher = Matcher::new(config);
    let mut buf = (Vec::new(), Vec::new());
    let haystack = Utf32Str::new("café", &mut buf.0);
    let needle = Utf32Str::new("cafe", &mut buf.1);
    assert!(matcher.fuzzy_match(haystack, needle).is_some());

    let config = MatcherConfig { normalize: false, ..MatcherConfig::DEFAULT };
    let mut matcher = Matcher::new(config);
    let mut buf = (Vec::new(), Vec::new());
    let haystack = Utf32Str::new("café", &mut buf.0);
    let needle = Utf32Str::new("cafe", &mut buf.1);
    assert_eq!(matcher.fuzzy_match(haystack, needle), None);
}

#[test]
fn match_paths_treats_slash_as_delimiter() {
    let config = MatcherConfig::DEFAULT.match_paths();
    let bonus = config.bonus_boundary_delimiter * BONUS_FIRST_CHAR_MULTIPLIER;
    assert_matches(&[FuzzyOptimal], config, &[("src/lib.rs", "lib", &[4, 5, 6], bonus)]);
}

#[test]
fn exact_prefix_postfix_match() {
    let mut matcher = Matcher::new(MatcherConfig::DEFAULT);
    let mut buf = (Vec::new(), Vec::new());
    let haystack = Utf32Str::new("hello world", &mut buf.0);
    let needle = Utf32Str::new("hello world", &mut buf.1);
    assert!(matcher.exact_match(haystack, needle).is_some());

    let mut buf = (Vec::new(), Vec::new());
    let haystack = Utf32Str::new("hello world", &mut buf.0);
    let needle = Utf32Str::new("hello", &mut buf.1);
    assert!(matcher.prefix_match(haystack, needle).is_some());

    let mut buf = (Vec::new(), Vec::new());
    let haystack = Utf32Str::new("hello world", &mut buf.0);
    let needle = Utf32Str::new("world", &mut buf.1);
    assert!(matcher.postfix_match(haystack, needle).is_some());

    let mut buf = (Vec::new(), Vec::new());
    let haystack = Utf32Str::new("hello world", &mut buf.0);
    let needle = Utf32Str::new("world", &mut buf.1);
    assert_eq!(matcher.prefix_match(haystack, needle), None);
}

#[test]
fn single_char_needle_finds_best_occurrence() {
    let mut matcher = Matcher::new(MatcherConfig::DEFAULT);
    let mut buf = (Vec::new(), Vec::new());
    let haystack = Utf32Str::new("xx_Bar", &mut buf.0);
    let needle = Utf32Str::new("b", &mut buf.1);
    let mut indices = Vec::new();
    let score = matcher.fuzzy_indices(haystack, needle, &mut indices);
    assert!(score.is_some());
    assert_eq!(indices, vec![3]);
}
