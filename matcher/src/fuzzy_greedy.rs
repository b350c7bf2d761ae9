//! Linear-time fallback matcher used when the haystack/needle pair is too
//! large for the DP matrix, or explicitly requested for speed over
//! optimality. Greedily consumes the needle left to right to find an
//! upper bound on the match end, then greedily consumes it right to left
//! to tighten the start, and scores whatever window that leaves.
//!
//! The reported score and indices are not guaranteed optimal: a better
//! alignment may exist that this two-pass greedy sweep doesn't find.

use crate::chars::Char;
use crate::Matcher;

impl Matcher {
    pub(crate) fn fuzzy_match_greedy_inner<const INDICES: bool, H: Char + PartialEq<N>, N: Char>(
        &mut self,
        haystack: &[H],
        needle: &[N],
        mut start: usize,
        mut end: usize,
        indices: &mut Vec<u32>,
    ) -> Option<u16> {
        // the prefilter already pinned the first character down for ASCII
        // haystacks, so only widen `end` on the unicode path.
        let first_char_end = if H::ASCII { start + 1 } else { end };
        if !H::ASCII && needle.len() != 1 {
            let mut needle_iter = needle[1..].iter().copied();
            if let Some(mut needle_char) = needle_iter.next() {
                for (i, &c) in haystack[first_char_end..].iter().enumerate() {
                    if c.normalize(&self.config) == needle_char {
                        let Some(next) = needle_iter.next() else {
                            end = first_char_end + i + 1;
                            break;
                        };
                        needle_char = next;
                    }
                }
            }
        }

        // tighten the greedy match by also matching greedily in reverse
        let mut needle_iter = needle.iter().rev().copied();
        let mut needle_char = needle_iter.next().unwrap();
        for (i, &c) in haystack[start..end].iter().enumerate().rev() {
            if c == needle_char {
                let Some(next) = needle_iter.next() else {
                    start += i;
                    break;
                };
                needle_char = next;
            }
        }
        Some(self.calculate_score::<INDICES, H, N>(haystack, needle, start, end, indices))
    }
}
