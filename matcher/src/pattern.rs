//! A higher level pattern DSL layered on top of [`Matcher`]: splits
//! whitespace-separated words into independent [`Atom`]s, each of which
//! can additionally request substring/prefix/postfix/exact matching and
//! negation via leading/trailing punctuation.

use std::cmp::Reverse;

use crate::chars;
use crate::utf32_string::Utf32String;
use crate::{Matcher, Utf32Str};

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
/// How case mismatches between needle and haystack are treated.
pub enum CaseMatching {
    /// Characters always match their case-folded version (`a == A`).
    Ignore,
    /// Characters never match their case-folded version (`a != A`).
    Respect,
    /// Acts like `Ignore` if every character in the atom is lowercase,
    /// and like `Respect` otherwise.
    #[default]
    Smart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
/// Whether diacritics are folded to their base letter before comparing.
pub enum Normalization {
    /// Diacritics are never folded; `é` only matches `é`.
    Never,
    /// Diacritics are always folded; `é` also matches `e`.
    Always,
    /// Folds diacritics unless the atom itself contains one, mirroring
    /// [`CaseMatching::Smart`]: typing an accented character opts an atom
    /// back into exact diacritic matching.
    #[default]
    Smart,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
/// The kind of matching algorithm an atom runs.
pub enum AtomKind {
    /// The needle may match haystack characters with gaps in between.
    /// The default when no special syntax is used; there's no negated
    /// fuzzy matching since that produces too many false positives.
    ///
    /// See [`Matcher::fuzzy_match`].
    Fuzzy,
    /// The needle must occur as a contiguous run of haystack characters
    /// anywhere in the haystack. Parsed from a leading `'` or `!`.
    ///
    /// See [`Matcher::substring_match`].
    Substring,
    /// The needle must be a contiguous prefix of the haystack. Parsed
    /// from a leading `^`.
    ///
    /// See [`Matcher::prefix_match`].
    Prefix,
    /// The needle must be a contiguous suffix of the haystack. Parsed
    /// from a trailing `$`.
    ///
    /// See [`Matcher::postfix_match`].
    Postfix,
    /// The needle must match the haystack exactly. Parsed from `^foo$`.
    ///
    /// See [`Matcher::exact_match`].
    Exact,
}

/// A single pattern component matched with one [`Matcher`] function.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Atom {
    /// A negated atom rejects any haystack that matches it; it never
    /// contributes to the score or indices of haystacks it doesn't reject.
    pub negative: bool,
    pub kind: AtomKind,
    needle: Utf32String,
    ignore_case: bool,
    normalize: bool,
}

impl Atom {
    /// Builds a single atom without parsing any special syntax — `$`,
    /// `!`, `'` and `^` are taken literally. `escape_whitespace` controls
    /// whether `\ ` decodes to a literal space.
    pub fn new(
        needle: &str,
        case: CaseMatching,
        normalization: Normalization,
        kind: AtomKind,
        escape_whitespace: bool,
    ) -> Atom {
        Atom::new_inner(needle, case, normalization, kind, escape_whitespace, false)
    }

    fn new_inner(
        needle: &str,
        case: CaseMatching,
        normalization: Normalization,
        kind: AtomKind,
        escape_whitespace: bool,
        append_dollar: bool,
    ) -> Atom {
        let mut ignore_case;
        let mut normalize;
        let needle = if needle.is_ascii() {
            let mut needle = if escape_whitespace {
                unescape_whitespace(needle)
            } else {
                needle.to_owned()
            };
            match case {
                CaseMatching::Ignore => {
                    ignore_case = true;
                    needle.make_ascii_lowercase();
                }
                CaseMatching::Smart => ignore_case = !needle.bytes().any(|b| b.is_ascii_uppercase()),
                CaseMatching::Respect => ignore_case = false,
            }
            // ASCII text never carries the diacritics normalization folds.
            normalize = false;
            if append_dollar {
                needle.push('$');
            }
            Utf32String::Ascii(needle.into_boxed_str())
        } else {
            let mut needle_ = Vec::with_capacity(needle.len());
            ignore_case = matches!(case, CaseMatching::Ignore | CaseMatching::Smart);
            normalize = matches!(normalization, Normalization::Always | Normalization::Smart);
            let mut push = |mut c: char| {
                match case {
                    CaseMatching::Ignore => c = chars::to_lower_case(c),
                    CaseMatching::Smart => ignore_case = ignore_case && !chars::is_upper_case(c),
                    CaseMatching::Respect => (),
                }
                if matches!(normalization, Normalization::Smart) && c != chars::strip_diacritic(c) {
                    normalize = false;
                }
                needle_.push(c);
            };
            if escape_whitespace {
                let mut saw_backslash = false;
                for c in chars::chars(needle) {
                    if saw_backslash {
                        if c == ' ' {
                            push(' ');
                            saw_backslash = false;
                            continue;
                        } else {
                            push('\\');
                        }
                    }
                    saw_backslash = c == '\\';
                    if !saw_backslash {
                        push(c);
                    }
                }
            } else {
                for c in chars::chars(needle) {
                    push(c);
                }
            }
            if append_dollar {
                needle_.push('$');
            }
            Utf32String::Unicode(needle_.into_boxed_slice())
        };
        Atom { kind, needle, negative: false, ignore_case, normalize }
    }

    /// Parses a single pattern atom from raw user input, recognizing the
    /// leading/trailing punctuation documented on [`AtomKind`].
    pub fn parse(raw: &str, case: CaseMatching, normalization: Normalization) -> Atom {
        let mut atom = raw;
        let invert = match atom.as_bytes() {
            [b'!', ..] => {
                atom = &atom[1..];
                true
            }
            [b'\\', b'!', ..] => {
                atom = &atom[1..];
                false
            }
            _ => false,
        };

        let mut kind = match atom.as_bytes() {
            [b'^', ..] => {
                atom = &atom[1..];
                AtomKind::Prefix
            }
            [b'\'', ..] => {
                atom = &atom[1..];
                AtomKind::Substring
            }
            [b'\\', b'^' | b'\'', ..] => {
                atom = &atom[1..];
                AtomKind::Fuzzy
            }
            _ => AtomKind::Fuzzy,
        };

        let mut append_dollar = false;
        match atom.as_bytes() {
            [.., b'\\', b'$'] => {
                append_dollar = true;
                atom = &atom[..atom.len() - 2];
            }
            [.., b'$'] => {
                kind = if kind == AtomKind::Fuzzy { AtomKind::Postfix } else { AtomKind::Exact };
                atom = &atom[..atom.len() - 1];
            }
            _ => (),
        }

        if invert && kind == AtomKind::Fuzzy {
            kind = AtomKind::Substring;
        }

        let mut atom = Atom::new_inner(atom, case, normalization, kind, true, append_dollar);
        atom.negative = invert;
        atom
    }

    fn apply_config(&self, matcher: &mut Matcher) {
        matcher.config.ignore_case = self.ignore_case;
        matcher.config.normalize = self.normalize;
    }

    /// Scores this atom against `haystack`. Negated atoms score `0` when
    /// they fail to match (and reject the haystack by returning `None`
    /// when they do match).
    ///
    /// *Note:* this overwrites [`MatcherConfig::ignore_case`](crate::MatcherConfig::ignore_case)
    /// and [`MatcherConfig::normalize`](crate::MatcherConfig::normalize) to match this atom.
    pub fn score(&self, haystack: Utf32Str<'_>, matcher: &mut Matcher) -> Option<u16> {
        self.apply_config(matcher);
        let score = self.raw_score(haystack, matcher);
        if self.negative {
            score.is_none().then_some(0)
        } else {
            score
        }
    }

    /// Like [`score`](Atom::score) but also appends match indices to
    /// `indices` (never cleared; callers merge indices across atoms by
    /// sorting and deduplicating).
    pub fn indices(&self, haystack: Utf32Str<'_>, matcher: &mut Matcher, indices: &mut Vec<u32>) -> Option<u16> {
        self.apply_config(matcher);
        if self.negative {
            return self.raw_score(haystack, matcher).is_none().then_some(0);
        }
        match self.kind {
            AtomKind::Exact => matcher.exact_indices(haystack, self.needle.slice(..), indices),
            AtomKind::Fuzzy => matcher.fuzzy_indices(haystack, self.needle.slice(..), indices),
            AtomKind::Substring => matcher.substring_indices(haystack, self.needle.slice(..), indices),
            AtomKind::Prefix => matcher.prefix_indices(haystack, self.needle.slice(..), indices),
            AtomKind::Postfix => matcher.postfix_indices(haystack, self.needle.slice(..), indices),
        }
    }

    fn raw_score(&self, haystack: Utf32Str<'_>, matcher: &mut Matcher) -> Option<u16> {
        match self.kind {
            AtomKind::Exact => matcher.exact_match(haystack, self.needle.slice(..)),
            AtomKind::Fuzzy => matcher.fuzzy_match(haystack, self.needle.slice(..)),
            AtomKind::Substring => matcher.substring_match(haystack, self.needle.slice(..)),
            AtomKind::Prefix => matcher.prefix_match(haystack, self.needle.slice(..)),
            AtomKind::Postfix => matcher.postfix_match(haystack, self.needle.slice(..)),
        }
    }

    /// The decoded needle text passed to the matcher; indices from the
    /// `indices` functions index into this text.
    pub fn needle_text(&self) -> Utf32Str<'_> {
        self.needle.slice(..)
    }
}

fn unescape_whitespace(needle: &str) -> String {
    let Some((start, rem)) = needle.split_once("\\ ") else {
        return needle.to_owned();
    };
    let mut out = start.to_owned();
    for rem in rem.split("\\ ") {
        out.push(' ');
        out.push_str(rem);
    }
    out
}

fn pattern_atoms(pattern: &str) -> impl Iterator<Item = &str> + '_ {
    let mut saw_backslash = false;
    pattern.split(move |c| {
        saw_backslash = match c {
            ' ' if !saw_backslash => return true,
            '\\' => true,
            _ => false,
        };
        false
    })
}

#[derive(Debug, Default, Clone)]
#[non_exhaustive]
/// A full match pattern: one independently-scored [`Atom`] per
/// whitespace-separated word.
pub struct Pattern {
    pub atoms: Vec<Atom>,
}

impl Pattern {
    /// Splits `pattern` on whitespace (escapable with `\`) into atoms of
    /// a single fixed `kind`, without parsing any of [`Atom::parse`]'s
    /// special leading/trailing syntax.
    pub fn new(case: CaseMatching, normalization: Normalization, kind: AtomKind, pattern: &str) -> Pattern {
        let atoms = pattern_atoms(pattern)
            .filter_map(|atom| {
                let atom = Atom::new(atom, case, normalization, kind, true);
                (!atom.needle.is_empty()).then_some(atom)
            })
            .collect();
        Pattern { atoms }
    }

    /// Splits `pattern` on whitespace into atoms, parsing each word's
    /// leading/trailing punctuation per [`Atom::parse`].
    pub fn parse(case: CaseMatching, normalization: Normalization, pattern: &str) -> Pattern {
        let atoms = pattern_atoms(pattern)
            .filter_map(|atom| {
                let atom = Atom::parse(atom, case, normalization);
                (!atom.needle.is_empty()).then_some(atom)
            })
            .collect();
        Pattern { atoms }
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Re-splits and re-parses `pattern` in place, replacing the current atoms.
    pub fn reparse(&mut self, pattern: &str, case: CaseMatching, normalization: Normalization) {
        self.atoms.clear();
        let atoms = pattern_atoms(pattern).filter_map(|atom| {
            let atom = Atom::parse(atom, case, normalization);
            (!atom.needle.is_empty()).then_some(atom)
        });
        self.atoms.extend(atoms);
    }

    /// Sums each atom's score against `haystack`. An empty pattern scores
    /// every haystack `0` (matches everything); any atom failing to match
    /// (including a negative atom that does match) rejects the haystack.
    pub fn score(&self, haystack: Utf32Str<'_>, matcher: &mut Matcher) -> Option<u32> {
        if self.atoms.is_empty() {
            return Some(0);
        }
        let mut score = 0u32;
        for atom in &self.atoms {
            score += atom.score(haystack, matcher)? as u32;
        }
        Some(score)
    }

    /// Like [`score`](Pattern::score) but also appends each atom's
    /// indices into `indices` (callers should sort and dedup afterwards).
    pub fn indices(&self, haystack: Utf32Str<'_>, matcher: &mut Matcher, indices: &mut Vec<u32>) -> Option<u32> {
        if self.atoms.is_empty() {
            return Some(0);
        }
        let mut score = 0u32;
        for atom in &self.atoms {
            score += atom.indices(haystack, matcher, indices)? as u32;
        }
        Some(score)
    }

    /// Convenience helper for matching a modest in-memory list of items;
    /// runs entirely on the calling thread so it's unsuitable for large
    /// or streaming inputs.
    pub fn match_list<T: AsRef<str>>(&self, matcher: &mut Matcher, items: impl IntoIterator<Item = T>) -> Vec<(T, u32)> {
        if self.atoms.is_empty() {
            return items.into_iter().map(|item| (item, 0)).collect();
        }
        let mut buf = Vec::new();
        let mut items: Vec<_> = items
            .into_iter()
            .filter_map(|item| self.score(Utf32Str::new(item.as_ref(), &mut buf), matcher).map(|score| (item, score)))
            .collect();
        items.sort_by_key(|(_, score)| Reverse(*score));
        items
    }
}
