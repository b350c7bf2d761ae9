use crate::chars::CharClass;
use crate::score::BONUS_BOUNDARY;

/// Tunable weights and normalization rules for a [`Matcher`](crate::Matcher).
///
/// Most callers want [`MatcherConfig::DEFAULT`], possibly adjusted with
/// [`match_paths`](MatcherConfig::match_paths) for filesystem-path
/// haystacks.
#[non_exhaustive]
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct MatcherConfig {
    /// Characters that act as word boundaries in addition to whitespace,
    /// e.g. `/`, `:`, `,` for path-like haystacks.
    pub delimiter_chars: &'static [u8],
    /// Bonus for a word starting right after whitespace (or the start of
    /// the haystack).
    pub bonus_boundary_white: u16,
    /// Bonus for a word starting right after a delimiter character.
    pub bonus_boundary_delimiter: u16,
    /// The character class assumed to precede the first haystack character.
    pub initial_char_class: CharClass,
    /// Fold a small set of Latin diacritics to their ASCII base letter.
    pub normalize: bool,
    /// Fold case before comparing haystack and needle characters.
    pub ignore_case: bool,
    /// Add a small bonus to matches that start near the beginning of the
    /// haystack. Useful for autocomplete-style matching; not recommended
    /// for a general fuzzy picker where explicit `^prefix` atoms and word
    /// boundaries already do this job.
    pub prefer_prefix: bool,
}

impl MatcherConfig {
    pub const DEFAULT: Self = MatcherConfig {
        delimiter_chars: b"/,:;|",
        bonus_boundary_white: BONUS_BOUNDARY + 2,
        bonus_boundary_delimiter: BONUS_BOUNDARY + 1,
        initial_char_class: CharClass::Whitespace,
        normalize: false,
        ignore_case: true,
        prefer_prefix: false,
    };

    /// Tune the config for matching filesystem paths: only `/` (or `/`
    /// and `\` on Windows) counts as a delimiter and the path separator
    /// itself is treated like a word boundary rather than whitespace.
    pub const fn match_paths(mut self) -> Self {
        if cfg!(windows) {
            self.delimiter_chars = b"/\\";
        } else {
            self.delimiter_chars = b"/";
        }
        self.bonus_boundary_white = BONUS_BOUNDARY;
        self.initial_char_class = CharClass::Delimiter;
        self
    }

    #[inline]
    pub(crate) fn char_class_ascii(&self, c: u8) -> CharClass {
        if c.is_ascii_lowercase() {
            CharClass::Lower
        } else if c.is_ascii_uppercase() {
            CharClass::Upper
        } else if c.is_ascii_digit() {
            CharClass::Number
        } else if c.is_ascii_whitespace() {
            CharClass::Whitespace
        } else if self.delimiter_chars.contains(&c) {
            CharClass::Delimiter
        } else {
            CharClass::NonWord
        }
    }
}
