//! Specialized routines for the pattern atom kinds that don't need the full
//! DP matrix: exact, prefix, postfix, and substring matches all have a
//! fixed, computable score once their boundaries are known, and a
//! single-character substring search can skip matrix setup entirely.

use memchr::{Memchr, Memchr2};

use crate::chars::{AsciiChar, Char};
use crate::score::{BONUS_CONSECUTIVE, BONUS_FIRST_CHAR_MULTIPLIER, SCORE_MATCH};
use crate::Matcher;

impl Matcher {
    /// Best-scoring occurrence of a single ASCII needle character anywhere
    /// in `haystack`. Stops early once a boundary bonus is found, since no
    /// later occurrence could score higher.
    pub(crate) fn substring_match_1_ascii<const INDICES: bool>(
        &mut self,
        haystack: &[u8],
        c: AsciiChar,
        indices: &mut Vec<u32>,
    ) -> Option<u16> {
        let c = c.0;
        let mut max_score = 0;
        let mut max_pos = 0;
        let positions: Box<dyn Iterator<Item = usize>> = if self.config.ignore_case && c.is_ascii_lowercase() {
            Box::new(Memchr2::new(c, c.to_ascii_uppercase(), haystack))
        } else {
            Box::new(Memchr::new(c, haystack))
        };
        for i in positions {
            let prev_class = i
                .checked_sub(1)
                .map(|i| AsciiChar(haystack[i]).char_class(&self.config))
                .unwrap_or(self.config.initial_char_class);
            let class = AsciiChar(haystack[i]).char_class(&self.config);
            let bonus = self.config.bonus_for(prev_class, class);
            let score = bonus * BONUS_FIRST_CHAR_MULTIPLIER + SCORE_MATCH;
            if score > max_score {
                max_pos = i as u32;
                max_score = score;
                if score >= self.config.bonus_boundary_white && score >= self.config.bonus_boundary_delimiter {
                    break;
                }
            }
        }
        if max_score == 0 {
            return None;
        }
        if INDICES {
            indices.clear();
            indices.push(max_pos);
        }
        Some(max_score)
    }

    /// Best-scoring occurrence of a single non-ASCII needle character
    /// anywhere in `haystack`.
    pub(crate) fn substring_match_1_non_ascii<const INDICES: bool>(
        &mut self,
        haystack: &[char],
        needle: char,
        indices: &mut Vec<u32>,
    ) -> Option<u16> {
        let mut max_score = 0;
        let mut max_pos = 0;
        let mut prev_class = self.config.initial_char_class;
        for (i, &c) in haystack.iter().enumerate() {
            let (c, class) = c.char_class_and_normalize(&self.config);
            if c != needle {
                prev_class = class;
                continue;
            }
            let bonus = self.config.bonus_for(prev_class, class);
            prev_class = class;
            let score = bonus * BONUS_FIRST_CHAR_MULTIPLIER + SCORE_MATCH;
            if score > max_score {
                max_pos = i as u32;
                max_score = score;
                if score >= self.config.bonus_boundary_white && score >= self.config.bonus_boundary_delimiter {
                    break;
                }
            }
        }
        if max_score == 0 {
            return None;
        }
        if INDICES {
            indices.clear();
            indices.push(max_pos);
        }
        Some(max_score)
    }

    /// Best-scoring occurrence of a multi-character needle as a verbatim
    /// substring of an ASCII haystack. Anchors on the needle's first
    /// character with `memchr`, then compares the full slice at each
    /// candidate position.
    pub(crate) fn substring_match_ascii<const INDICES: bool>(
        &mut self,
        haystack: &[u8],
        needle: &[AsciiChar],
        indices: &mut Vec<u32>,
    ) -> Option<u16> {
        let first = needle[0].0;
        let ignore_case = self.config.ignore_case;
        let positions: Box<dyn Iterator<Item = usize>> = if ignore_case && first.is_ascii_lowercase() {
            Box::new(Memchr2::new(first, first.to_ascii_uppercase(), haystack))
        } else {
            Box::new(Memchr::new(first, haystack))
        };

        let mut max_score = 0;
        let mut max_start = 0;
        for start in positions {
            let end = start + needle.len();
            if end > haystack.len() {
                break;
            }
            let window = AsciiChar::cast(&haystack[start..end]);
            let matches = if ignore_case {
                window.iter().map(|c| c.normalize(&self.config)).eq(needle.iter().map(|c| c.normalize(&self.config)))
            } else {
                window == needle
            };
            if !matches {
                continue;
            }
            let score = self.exact_score(AsciiChar::cast(haystack), start, end);
            if score > max_score {
                max_score = score;
                max_start = start;
            }
        }
        if max_score == 0 {
            return None;
        }
        if INDICES {
            indices.clear();
            indices.extend((max_start as u32)..(max_start + needle.len()) as u32);
        }
        Some(max_score)
    }

    /// Best-scoring occurrence of a multi-character needle as a verbatim
    /// substring of a Unicode haystack, starting the scan no earlier than
    /// `start` (as already narrowed down by the prefilter).
    pub(crate) fn substring_match_non_ascii<const INDICES: bool, N: Char>(
        &mut self,
        haystack: &[char],
        needle: &[N],
        start: usize,
        indices: &mut Vec<u32>,
    ) -> Option<u16> {
        let config = self.config;
        let mut max_score = 0;
        let mut max_start = 0;
        for candidate in start..=haystack.len().saturating_sub(needle.len()) {
            let end = candidate + needle.len();
            let matches = haystack[candidate..end]
                .iter()
                .map(|c| c.normalize(&config))
                .eq(needle.iter().map(|c| c.normalize(&config).as_char()));
            if !matches {
                continue;
            }
            let score = self.exact_score(haystack, candidate, end);
            if score > max_score {
                max_score = score;
                max_start = candidate;
            }
        }
        if max_score == 0 {
            return None;
        }
        if INDICES {
            indices.clear();
            indices.extend((max_start as u32)..(max_start + needle.len()) as u32);
        }
        Some(max_score)
    }

    /// Score for a needle found verbatim at `start..end`. Every needle
    /// character after the first is part of the same consecutive run, so
    /// only the boundary bonus right before `start` and the per-character
    /// match score matter.
    pub(crate) fn exact_score<H: Char>(&self, haystack: &[H], start: usize, end: usize) -> u16 {
        let config = &self.config;
        let prev_class = start
            .checked_sub(1)
            .map(|i| haystack[i].char_class(config))
            .unwrap_or(config.initial_char_class);
        let class = haystack[start].char_class(config);
        let first_bonus = self.bonus_for(prev_class, class);
        let len = (end - start) as u16;
        let mut score = SCORE_MATCH * len + first_bonus * BONUS_FIRST_CHAR_MULTIPLIER;
        if len > 1 {
            score += BONUS_CONSECUTIVE * (len - 1);
        }
        score.saturating_add(config.prefix_bonus(start))
    }
}
