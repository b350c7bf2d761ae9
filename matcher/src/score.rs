use std::cmp::max;

use crate::chars::{Char, CharClass};
use crate::{Matcher, MatcherConfig};

pub(crate) const SCORE_MATCH: u16 = 16;
pub(crate) const PENALTY_GAP_START: u16 = 3;
pub(crate) const PENALTY_GAP_EXTENSION: u16 = 1;

// We prefer matches at the beginning of a word, but the bonus should not be
// too great to prevent the longer acronym matches from always winning over
// shorter fuzzy matches.
pub(crate) const BONUS_BOUNDARY: u16 = SCORE_MATCH / 2;

// Non-contextual bonus for non-word characters, used both standalone and as
// a base when computing consecutive-chunk bonuses.
pub(crate) const BONUS_NON_WORD: u16 = SCORE_MATCH / 2;

// Edge-triggered bonus for camelCase / letter-to-digit transitions.
pub(crate) const BONUS_CAMEL123: u16 = 5;

// Minimum bonus given to characters that extend a consecutive match run.
pub(crate) const BONUS_CONSECUTIVE: u16 = PENALTY_GAP_START + PENALTY_GAP_EXTENSION;

// The first character of the needle usually carries more significance than
// the rest, so its bonus is scaled up relative to later characters.
pub(crate) const BONUS_FIRST_CHAR_MULTIPLIER: u16 = 2;

pub(crate) const MAX_PREFIX_BONUS: u16 = SCORE_MATCH / 2;
pub(crate) const PREFIX_BONUS_SCALE: u16 = 2;

impl MatcherConfig {
    #[inline]
    pub(crate) fn bonus_for(&self, prev_class: CharClass, class: CharClass) -> u16 {
        if class > CharClass::NonWord {
            // transition from non-word to word
            match prev_class {
                CharClass::Whitespace => return self.bonus_boundary_white,
                CharClass::Delimiter => return self.bonus_boundary_delimiter,
                CharClass::NonWord => return BONUS_BOUNDARY,
                _ => (),
            }
        }
        if prev_class == CharClass::Lower && class == CharClass::Upper
            || prev_class != CharClass::Number && class == CharClass::Number
        {
            // camelCase / letter123
            BONUS_CAMEL123
        } else if class == CharClass::NonWord {
            BONUS_NON_WORD
        } else if class == CharClass::Whitespace {
            self.bonus_boundary_white
        } else {
            0
        }
    }

    /// Additive bonus for a match window starting at `start`, applied only
    /// when [`prefer_prefix`](MatcherConfig::prefer_prefix) is enabled.
    #[inline]
    pub(crate) fn prefix_bonus(&self, start: usize) -> u16 {
        if !self.prefer_prefix {
            return 0;
        }
        let penalty = (PENALTY_GAP_START as usize * start.saturating_sub(1)) / PREFIX_BONUS_SCALE as usize;
        MAX_PREFIX_BONUS.saturating_sub(penalty as u16)
    }
}

impl Matcher {
    #[inline(always)]
    pub(crate) fn bonus_for(&self, prev_class: CharClass, class: CharClass) -> u16 {
        self.config.bonus_for(prev_class, class)
    }

    /// Final single-pass score for a contiguous match window `[start, end)`,
    /// used whenever the prefilter has already pinned down the match
    /// boundaries (contiguous matches, substring candidates, the greedy
    /// fallback).
    pub(crate) fn calculate_score<const INDICES: bool, H: Char + PartialEq<N>, N: Char>(
        &mut self,
        haystack: &[H],
        needle: &[N],
        start: usize,
        end: usize,
        indices: &mut Vec<u32>,
    ) -> u16 {
        if INDICES {
            indices.clear();
            indices.reserve(needle.len());
        }

        let mut prev_class = start
            .checked_sub(1)
            .map(|i| haystack[i].char_class(&self.config))
            .unwrap_or(self.config.initial_char_class);
        let mut needle_iter = needle.iter();
        let mut needle_char = *needle_iter.next().unwrap();

        let mut in_gap = false;
        let mut consecutive = 1u16;

        if INDICES {
            indices.push(start as u32);
        }
        let first_class = haystack[start].char_class(&self.config);
        let mut first_bonus = self.bonus_for(prev_class, first_class);
        let mut score = SCORE_MATCH + first_bonus * BONUS_FIRST_CHAR_MULTIPLIER;
        prev_class = first_class;

        for (i, &c) in haystack[start + 1..end].iter().enumerate() {
            let pos = start + 1 + i;
            let (c, class) = c.char_class_and_normalize(&self.config);
            if c == needle_char {
                if INDICES {
                    indices.push(pos as u32);
                }
                let mut bonus = self.bonus_for(prev_class, class);
                if consecutive == 0 {
                    first_bonus = bonus;
                } else if bonus > first_bonus {
                    if bonus >= BONUS_BOUNDARY {
                        first_bonus = bonus;
                    } else {
                        bonus = max(bonus, BONUS_CONSECUTIVE);
                    }
                } else {
                    bonus = max(first_bonus, BONUS_CONSECUTIVE);
                }
                score += SCORE_MATCH + bonus;
                in_gap = false;
                consecutive += 1;
                if let Some(&next) = needle_iter.next() {
                    needle_char = next;
                }
            } else {
                let penalty = if in_gap { PENALTY_GAP_EXTENSION } else { PENALTY_GAP_START };
                score = score.saturating_sub(penalty);
                in_gap = true;
                consecutive = 0;
                first_bonus = 0;
            }
            prev_class = class;
        }

        score = score.saturating_add(self.config.prefix_bonus(start));
        score
    }
}
