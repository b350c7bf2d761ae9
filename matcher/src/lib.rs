//! A low level crate providing the fuzzy matching engine used by `needlefind`.
//!
//! The matcher is built for throughput: [`Matcher`] holds reusable scratch
//! memory so that none of its match functions allocate (beyond growing the
//! caller-supplied `indices` vector when necessary). Haystacks and needles
//! are expected as [`Utf32Str`] rather than `&str`, since the matcher walks
//! codepoints, sometimes more than once per match, and paying the UTF-8
//! decoding cost up front is much cheaper than doing it inline.

#![allow(clippy::manual_range_contains)]

pub mod chars;
mod config;
mod exact;
mod fuzzy_greedy;
mod fuzzy_optimal;
mod matrix;
pub mod pattern;
mod prefilter;
mod score;
mod utf32_str;
mod utf32_string;

#[cfg(test)]
mod tests;

pub use crate::config::MatcherConfig;
pub use crate::pattern::{Atom, AtomKind, CaseMatching, Normalization, Pattern};
pub use crate::utf32_str::Utf32Str;
pub use crate::utf32_string::Utf32String;

use crate::chars::{AsciiChar, Char};
use crate::matrix::MatrixSlab;

/// A fuzzy matching engine.
///
/// A `Matcher` owns a scratch buffer (a [`MatrixSlab`]) reused across
/// calls so that matching itself never allocates. That buffer is several
/// hundred kilobytes, so matchers are meant to be created once and reused,
/// not constructed per match.
///
/// Functions named `..._match` only compute a score; functions named
/// `..._indices` additionally populate the codepoint positions of the
/// match into the caller's `indices` vector, which is cleared and
/// repopulated (not appended to) on success and left untouched on
/// failure.
pub struct Matcher {
    pub config: MatcherConfig,
    slab: MatrixSlab,
}

impl Clone for Matcher {
    fn clone(&self) -> Self {
        Matcher {
            config: self.config,
            slab: MatrixSlab::new(),
        }
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Matcher {
            config: MatcherConfig::DEFAULT,
            slab: MatrixSlab::new(),
        }
    }
}

impl Matcher {
    pub fn new(config: MatcherConfig) -> Self {
        Matcher { config, slab: MatrixSlab::new() }
    }

    /// Finds the highest scoring fuzzy alignment of `needle` within
    /// `haystack`. `O(nm)` for inputs within the matrix size limit;
    /// automatically falls back to [`fuzzy_match_greedy`](Matcher::fuzzy_match_greedy)
    /// beyond that.
    pub fn fuzzy_match(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>) -> Option<u16> {
        assert!(haystack.len() <= u32::MAX as usize);
        self.fuzzy_match_impl::<false>(haystack, needle, &mut Vec::new())
    }

    /// Like [`fuzzy_match`](Matcher::fuzzy_match) but also populates `indices`.
    pub fn fuzzy_indices(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>, indices: &mut Vec<u32>) -> Option<u16> {
        assert!(haystack.len() <= u32::MAX as usize);
        self.fuzzy_match_impl::<true>(haystack, needle, indices)
    }

    fn fuzzy_match_impl<const INDICES: bool>(
        &mut self,
        haystack_: Utf32Str<'_>,
        needle_: Utf32Str<'_>,
        indices: &mut Vec<u32>,
    ) -> Option<u16> {
        if needle_.len() > haystack_.len() || needle_.is_empty() {
            return None;
        }
        if needle_.len() == haystack_.len() {
            return self.exact_match_impl::<INDICES>(haystack_, needle_, 0, haystack_.len(), indices);
        }
        match (haystack_, needle_) {
            (Utf32Str::Ascii(haystack), Utf32Str::Ascii(needle)) => {
                let needle = AsciiChar::cast(needle);
                if let &[needle] = needle {
                    return self.substring_match_1_ascii::<INDICES>(haystack, needle, indices);
                }
                let (start, greedy_end, end) = self.prefilter_ascii(haystack, needle, false)?;
                if needle.len() == end - start {
                    cov_mark::hit!(small_haystack);
                    return Some(self.calculate_score::<INDICES, _, _>(
                        AsciiChar::cast(haystack),
                        needle,
                        start,
                        end,
                        indices,
                    ));
                }
                self.fuzzy_match_optimal::<INDICES, AsciiChar, AsciiChar>(
                    AsciiChar::cast(haystack),
                    needle,
                    start,
                    greedy_end,
                    end,
                    indices,
                )
            }
            // an ascii haystack can never match a needle containing
            // non-ascii characters since gaps between codepoints aren't
            // allowed to "absorb" a decode
            (Utf32Str::Ascii(_), Utf32Str::Unicode(_)) => None,
            (Utf32Str::Unicode(haystack), Utf32Str::Ascii(needle)) => {
                let needle = AsciiChar::cast(needle);
                if let &[needle] = needle {
                    return self.substring_match_1_non_ascii::<INDICES>(haystack, needle.as_char(), indices);
                }
                let needle_chars: Vec<char> = needle.iter().map(|c| c.as_char()).collect();
                let (start, greedy_end, end) = self.prefilter_non_ascii(haystack, &needle_chars, false)?;
                if needle.len() == end - start {
                    cov_mark::hit!(small_haystack);
                    return self.exact_match_impl::<INDICES>(haystack_, needle_, start, end, indices);
                }
                self.fuzzy_match_optimal::<INDICES, char, AsciiChar>(haystack, needle, start, greedy_end, end, indices)
            }
            (Utf32Str::Unicode(haystack), Utf32Str::Unicode(needle)) => {
                if let &[needle] = needle {
                    return self.substring_match_1_non_ascii::<INDICES>(haystack, needle, indices);
                }
                let (start, greedy_end, end) = self.prefilter_non_ascii(haystack, needle, false)?;
                if needle.len() == end - start {
                    cov_mark::hit!(small_haystack);
                    return self.exact_match_impl::<INDICES>(haystack_, needle_, start, end, indices);
                }
                self.fuzzy_match_optimal::<INDICES, char, char>(haystack, needle, start, greedy_end, end, indices)
            }
        }
    }

    /// Greedily finds a fuzzy alignment of `needle` in `haystack`. `O(n)`,
    /// but the score and indices may not be optimal; prefer
    /// [`fuzzy_match`](Matcher::fuzzy_match) unless the speed matters more
    /// than ranking precision.
    pub fn fuzzy_match_greedy(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>) -> Option<u16> {
        assert!(haystack.len() <= u32::MAX as usize);
        self.fuzzy_match_greedy_impl::<false>(haystack, needle, &mut Vec::new())
    }

    /// Like [`fuzzy_match_greedy`](Matcher::fuzzy_match_greedy) but also populates `indices`.
    pub fn fuzzy_indices_greedy(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>, indices: &mut Vec<u32>) -> Option<u16> {
        assert!(haystack.len() <= u32::MAX as usize);
        self.fuzzy_match_greedy_impl::<true>(haystack, needle, indices)
    }

    fn fuzzy_match_greedy_impl<const INDICES: bool>(
        &mut self,
        haystack: Utf32Str<'_>,
        needle_: Utf32Str<'_>,
        indices: &mut Vec<u32>,
    ) -> Option<u16> {
        if needle_.len() > haystack.len() || needle_.is_empty() {
            return None;
        }
        if needle_.len() == haystack.len() {
            return self.exact_match_impl::<INDICES>(haystack, needle_, 0, haystack.len(), indices);
        }
        match (haystack, needle_) {
            (Utf32Str::Ascii(haystack), Utf32Str::Ascii(needle)) => {
                let needle = AsciiChar::cast(needle);
                let (start, greedy_end, _) = self.prefilter_ascii(haystack, needle, true)?;
                if needle.len() == greedy_end - start {
                    return Some(self.calculate_score::<INDICES, _, _>(
                        AsciiChar::cast(haystack),
                        needle,
                        start,
                        greedy_end,
                        indices,
                    ));
                }
                self.fuzzy_match_greedy_inner::<INDICES, AsciiChar, AsciiChar>(
                    AsciiChar::cast(haystack),
                    needle,
                    start,
                    greedy_end,
                    indices,
                )
            }
            (Utf32Str::Ascii(_), Utf32Str::Unicode(_)) => None,
            (Utf32Str::Unicode(haystack), Utf32Str::Ascii(needle)) => {
                let needle = AsciiChar::cast(needle);
                let needle_chars: Vec<char> = needle.iter().map(|c| c.as_char()).collect();
                let (start, greedy_end, _) = self.prefilter_non_ascii(haystack, &needle_chars, true)?;
                self.fuzzy_match_greedy_inner::<INDICES, char, AsciiChar>(haystack, needle, start, greedy_end, indices)
            }
            (Utf32Str::Unicode(haystack), Utf32Str::Unicode(needle)) => {
                let (start, greedy_end, _) = self.prefilter_non_ascii(haystack, needle, true)?;
                self.fuzzy_match_greedy_inner::<INDICES, char, char>(haystack, needle, start, greedy_end, indices)
            }
        }
    }

    /// Finds the highest-scoring occurrence of `needle` as a verbatim
    /// substring of `haystack`. `O(nm)` worst case, but `memchr`-accelerated
    /// in the common case.
    pub fn substring_match(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>) -> Option<u16> {
        self.substring_match_impl::<false>(haystack, needle, &mut Vec::new())
    }

    /// Like [`substring_match`](Matcher::substring_match) but also populates `indices`.
    pub fn substring_indices(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>, indices: &mut Vec<u32>) -> Option<u16> {
        self.substring_match_impl::<true>(haystack, needle, indices)
    }

    fn substring_match_impl<const INDICES: bool>(
        &mut self,
        haystack: Utf32Str<'_>,
        needle_: Utf32Str<'_>,
        indices: &mut Vec<u32>,
    ) -> Option<u16> {
        if needle_.len() > haystack.len() || needle_.is_empty() {
            return None;
        }
        if needle_.len() == haystack.len() {
            return self.exact_match_impl::<INDICES>(haystack, needle_, 0, haystack.len(), indices);
        }
        match (haystack, needle_) {
            (Utf32Str::Ascii(haystack), Utf32Str::Ascii(needle)) => {
                let needle = AsciiChar::cast(needle);
                if let &[needle] = needle {
                    return self.substring_match_1_ascii::<INDICES>(haystack, needle, indices);
                }
                self.substring_match_ascii::<INDICES>(haystack, needle, indices)
            }
            (Utf32Str::Ascii(_), Utf32Str::Unicode(_)) => None,
            (Utf32Str::Unicode(haystack), Utf32Str::Ascii(needle)) => {
                let needle = AsciiChar::cast(needle);
                if let &[needle] = needle {
                    return self.substring_match_1_non_ascii::<INDICES>(haystack, needle.as_char(), indices);
                }
                self.substring_match_non_ascii::<INDICES, _>(haystack, needle, 0, indices)
            }
            (Utf32Str::Unicode(haystack), Utf32Str::Unicode(needle)) => {
                if let &[needle] = needle {
                    return self.substring_match_1_non_ascii::<INDICES>(haystack, needle, indices);
                }
                self.substring_match_non_ascii::<INDICES, _>(haystack, needle, 0, indices)
            }
        }
    }

    /// Checks whether `needle` and `haystack` match exactly. `O(n)`.
    pub fn exact_match(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>) -> Option<u16> {
        self.exact_match_impl::<false>(haystack, needle, 0, haystack.len(), &mut Vec::new())
    }

    /// Like [`exact_match`](Matcher::exact_match) but also populates `indices`.
    pub fn exact_indices(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>, indices: &mut Vec<u32>) -> Option<u16> {
        self.exact_match_impl::<true>(haystack, needle, 0, haystack.len(), indices)
    }

    /// Checks whether `needle` is a prefix of `haystack`. `O(n)`.
    pub fn prefix_match(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>) -> Option<u16> {
        (haystack.len() >= needle.len())
            .then(|| self.exact_match_impl::<false>(haystack, needle, 0, needle.len(), &mut Vec::new()))
            .flatten()
    }

    /// Like [`prefix_match`](Matcher::prefix_match) but also populates `indices`.
    pub fn prefix_indices(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>, indices: &mut Vec<u32>) -> Option<u16> {
        (haystack.len() >= needle.len())
            .then(|| self.exact_match_impl::<true>(haystack, needle, 0, needle.len(), indices))
            .flatten()
    }

    /// Checks whether `needle` is a postfix of `haystack`. `O(n)`.
    pub fn postfix_match(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>) -> Option<u16> {
        (haystack.len() >= needle.len())
            .then(|| {
                self.exact_match_impl::<false>(haystack, needle, haystack.len() - needle.len(), haystack.len(), &mut Vec::new())
            })
            .flatten()
    }

    /// Like [`postfix_match`](Matcher::postfix_match) but also populates `indices`.
    pub fn postfix_indices(&mut self, haystack: Utf32Str<'_>, needle: Utf32Str<'_>, indices: &mut Vec<u32>) -> Option<u16> {
        (haystack.len() >= needle.len())
            .then(|| self.exact_match_impl::<true>(haystack, needle, haystack.len() - needle.len(), haystack.len(), indices))
            .flatten()
    }

    fn exact_match_impl<const INDICES: bool>(
        &mut self,
        haystack: Utf32Str<'_>,
        needle_: Utf32Str<'_>,
        start: usize,
        end: usize,
        indices: &mut Vec<u32>,
    ) -> Option<u16> {
        if needle_.len() != end - start || needle_.is_empty() {
            return None;
        }
        let score = match (haystack, needle_) {
            (Utf32Str::Ascii(haystack), Utf32Str::Ascii(needle)) => {
                let needle = AsciiChar::cast(needle);
                let matched = AsciiChar::cast(&haystack[start..end])
                    .iter()
                    .map(|c| c.normalize(&self.config))
                    .eq(needle.iter().map(|c| c.normalize(&self.config)));
                if !matched {
                    return None;
                }
                self.calculate_score::<INDICES, _, _>(AsciiChar::cast(haystack), needle, start, end, indices)
            }
            (Utf32Str::Ascii(_), Utf32Str::Unicode(_)) => return None,
            (Utf32Str::Unicode(haystack), Utf32Str::Ascii(needle)) => {
                let needle = AsciiChar::cast(needle);
                let matched = haystack[start..end]
                    .iter()
                    .map(|c| c.normalize(&self.config))
                    .eq(needle.iter().map(|c| c.normalize(&self.config).as_char()));
                if !matched {
                    return None;
                }
                self.calculate_score::<INDICES, _, _>(haystack, needle, start, end, indices)
            }
            (Utf32Str::Unicode(haystack), Utf32Str::Unicode(needle)) => {
                let matched = haystack[start..end]
                    .iter()
                    .map(|c| c.normalize(&self.config))
                    .eq(needle.iter().map(|c| c.normalize(&self.config)));
                if !matched {
                    return None;
                }
                self.calculate_score::<INDICES, _, _>(haystack, needle, start, end, indices)
            }
        };
        Some(score)
    }
}
