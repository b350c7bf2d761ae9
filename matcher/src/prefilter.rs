//! Cheap O(n) bounds-finding before the DP matrix is ever touched.
//!
//! For every match call we first try to narrow the haystack down to the
//! smallest window that could possibly contain the needle's characters in
//! order, and bail out entirely if that's impossible. This turns "the
//! needle doesn't occur in the haystack at all" (by far the most common
//! case when filtering a large list) into a handful of `memchr` calls
//! instead of a DP matrix allocation.
//!
//! The needle passed in here is assumed to already be normalized (case
//! folded and/or diacritic-stripped per the active [`MatcherConfig`]).
//! The ASCII path additionally scans for both cases of each needle byte
//! since the haystack itself is not normalized ahead of time.

use crate::chars::{AsciiChar, Char};
use crate::Matcher;

impl Matcher {
    /// Scans `haystack` for the needle's characters in order, returning
    /// `(start, greedy_end, end)` where:
    /// - `start` is the first haystack index the match could start at,
    /// - `greedy_end` is one past the last haystack index touched while
    ///   greedily consuming the needle left to right,
    /// - `end` is one past the last haystack index the match could end at,
    ///   found by scanning forward from `greedy_end` to the end of the
    ///   haystack for a later occurrence of the final needle character.
    ///   Equal to `greedy_end` when `only_greedy` is set, since the caller
    ///   doesn't need it in that case.
    ///
    /// Returns `None` if some needle character does not occur in the
    /// remaining haystack at all, meaning the needle cannot match.
    pub(crate) fn prefilter_ascii(
        &self,
        haystack: &[u8],
        needle: &[AsciiChar],
        only_greedy: bool,
    ) -> Option<(usize, usize, usize)> {
        let ignore_case = self.config.ignore_case;
        let first = needle[0].0;
        let start = find_ascii(haystack, first, 0, ignore_case)?;

        let mut greedy_end = start + 1;
        for &c in &needle[1..] {
            let idx = find_ascii(haystack, c.0, greedy_end, ignore_case)?;
            greedy_end = idx + 1;
        }

        if only_greedy || needle.len() == 1 {
            return Some((start, greedy_end, greedy_end));
        }

        // widen the window by scanning forward from `greedy_end` (not back
        // into the already-consumed prefix) for a later occurrence of the
        // final needle character; the DP then gets to consider every
        // alignment up to that later occurrence, not just the greedy one.
        let last = needle[needle.len() - 1].0;
        let end = match rfind_ascii(haystack, last, greedy_end, ignore_case) {
            Some(idx) => idx + 1,
            None => greedy_end,
        };
        Some((start, greedy_end, end))
    }

    pub(crate) fn prefilter_non_ascii(
        &mut self,
        haystack: &[char],
        needle: &[char],
        only_greedy: bool,
    ) -> Option<(usize, usize, usize)> {
        let config = self.config;
        let mut iter = haystack.iter().enumerate();
        let first = needle[0];
        let (start, _) = iter.find(|&(_, &c)| c.normalize(&config) == first)?;

        let mut greedy_end = start + 1;
        for &needle_char in &needle[1..] {
            let (idx, _) = iter.find(|&(_, &c)| c.normalize(&config) == needle_char)?;
            greedy_end = idx + 1;
        }

        if only_greedy || needle.len() == 1 {
            return Some((start, greedy_end, greedy_end));
        }

        // widen the window by scanning forward from `greedy_end` for a
        // later occurrence of the final needle character, mirroring the
        // ASCII path above.
        let last = needle[needle.len() - 1];
        let end = haystack[greedy_end..]
            .iter()
            .enumerate()
            .rev()
            .find(|&(_, &c)| c.normalize(&config) == last)
            .map(|(idx, _)| greedy_end + idx + 1)
            .unwrap_or(greedy_end);
        Some((start, greedy_end, end))
    }
}

/// Find the first occurrence of `needle` at or after `from` in `haystack`.
/// When `ignore_case` is set, scans for both cases using `memchr2`.
fn find_ascii(haystack: &[u8], needle: u8, from: usize, ignore_case: bool) -> Option<usize> {
    let upper = needle.to_ascii_uppercase();
    let lower = needle.to_ascii_lowercase();
    if !ignore_case || upper == lower {
        memchr::memchr(needle, &haystack[from..]).map(|i| i + from)
    } else {
        memchr::memchr2(lower, upper, &haystack[from..]).map(|i| i + from)
    }
}

/// Find the last occurrence of `needle` at or after `from` in `haystack`,
/// returning an index into the full `haystack` (not relative to `from`).
/// When `ignore_case` is set, scans for both cases.
fn rfind_ascii(haystack: &[u8], needle: u8, from: usize, ignore_case: bool) -> Option<usize> {
    let upper = needle.to_ascii_uppercase();
    let lower = needle.to_ascii_lowercase();
    let window = &haystack[from..];
    let idx = if !ignore_case || upper == lower {
        memchr::memrchr(needle, window)
    } else {
        memchr::memrchr2(lower, upper, window)
    };
    idx.map(|i| i + from)
}
