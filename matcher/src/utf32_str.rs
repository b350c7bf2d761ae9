use std::ops::{Bound, RangeBounds};
use std::slice;

/// A borrowed, already-decoded view of a haystack or needle.
///
/// Rust's UTF-8 strings are great for storage but fuzzy matching walks
/// codepoints up to several times per match. Doing codepoint segmentation
/// on the fly blows through the cache and adds nontrivial overhead on top
/// of the matching itself, and ASCII-only text (the common case) gets a
/// much faster path if we know up front that no decoding is needed. So
/// haystacks and needles are pre-segmented once into one of two shapes:
///
/// - `Ascii`: the original bytes, reused with zero copies.
/// - `Unicode`: a codepoint array, decoded once.
///
/// The matcher dispatches statically on the combination of the two
/// variants and never reaches Unicode-handling code on the ASCII fast
/// path. [`len`](Utf32Str::len) is always a codepoint count, never a byte
/// count, and indices returned by the matcher index into this view, not
/// into the original UTF-8 bytes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Debug)]
pub enum Utf32Str<'a> {
    /// Correctness invariant: must only contain valid ASCII (<=127).
    Ascii(&'a [u8]),
    Unicode(&'a [char]),
}

impl<'a> Utf32Str<'a> {
    /// Builds a `Utf32Str` from a UTF-8 `str`. `buf` is used as scratch
    /// space for the `Unicode` variant and must outlive the returned
    /// value; it is left untouched when the fast ASCII path is taken.
    pub fn new(str: &'a str, buf: &'a mut Vec<char>) -> Self {
        // the ASCII fast path requires no "\r\n" sequences since those
        // collapse to a single LF in the Unicode variant below
        if str.is_ascii() && memchr::memchr(b'\r', str.as_bytes()).is_none() {
            Utf32Str::Ascii(str.as_bytes())
        } else {
            buf.clear();
            let mut chars = str.chars().peekable();
            while let Some(c) = chars.next() {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    continue;
                }
                buf.push(c);
            }
            Utf32Str::Unicode(&*buf)
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Utf32Str::Unicode(codepoints) => codepoints.len(),
            Utf32Str::Ascii(bytes) => bytes.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Utf32Str<'a> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end + 1,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len(),
        };
        match self {
            Utf32Str::Ascii(bytes) => Utf32Str::Ascii(&bytes[start..end]),
            Utf32Str::Unicode(codepoints) => Utf32Str::Unicode(&codepoints[start..end]),
        }
    }

    #[inline]
    pub fn is_ascii(&self) -> bool {
        matches!(self, Utf32Str::Ascii(_))
    }

    #[inline]
    pub fn get(&self, idx: u32) -> char {
        match self {
            Utf32Str::Ascii(bytes) => bytes[idx as usize] as char,
            Utf32Str::Unicode(codepoints) => codepoints[idx as usize],
        }
    }

    #[inline]
    pub fn last(&self) -> char {
        match self {
            Utf32Str::Ascii(bytes) => bytes[bytes.len() - 1] as char,
            Utf32Str::Unicode(codepoints) => codepoints[codepoints.len() - 1],
        }
    }

    #[inline]
    pub fn chars(&self) -> Chars<'a> {
        match self {
            Utf32Str::Ascii(bytes) => Chars::Ascii(bytes.iter()),
            Utf32Str::Unicode(codepoints) => Chars::Unicode(codepoints.iter()),
        }
    }
}

pub enum Chars<'a> {
    Ascii(slice::Iter<'a, u8>),
    Unicode(slice::Iter<'a, char>),
}

impl<'a> Iterator for Chars<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Chars::Ascii(iter) => iter.next().map(|&c| c as char),
            Chars::Unicode(iter) => iter.next().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_zero_copy() {
        let mut buf = Vec::new();
        let s = Utf32Str::new("hello world", &mut buf);
        assert!(s.is_ascii());
        assert_eq!(s.len(), 11);
        assert!(buf.is_empty());
    }

    #[test]
    fn unicode_decodes_codepoints() {
        let mut buf = Vec::new();
        let s = Utf32Str::new("héllo", &mut buf);
        assert!(!s.is_ascii());
        assert_eq!(s.len(), 5);
        assert_eq!(s.get(1), 'é');
    }

    #[test]
    fn slice_is_codepoint_indexed() {
        let mut buf = Vec::new();
        let s = Utf32Str::new("héllo", &mut buf);
        let sliced = s.slice(1..3);
        assert_eq!(sliced.chars().collect::<Vec<_>>(), vec!['é', 'l']);
    }
}
