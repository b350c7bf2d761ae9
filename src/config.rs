//! Top-level configuration: matcher weights plus the streaming/search
//! tunables the process boundary (§6) and throttling design notes call
//! for. Kept as plain tunables rather than magic numbers so callers can
//! override them without touching the search loop.

use std::time::Duration;

use needlefind_matcher::MatcherConfig;

use crate::field::FieldSpec;
use crate::query::QueryConfig;

/// The line delimiter used to split input records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDelimiter {
    /// LF-delimited (the default).
    Newline,
    /// NUL-delimited, selected by `-0`/`--read0`.
    Nul,
}

impl LineDelimiter {
    pub fn byte(self) -> u8 {
        match self {
            LineDelimiter::Newline => b'\n',
            LineDelimiter::Nul => 0,
        }
    }
}

impl Default for LineDelimiter {
    fn default() -> Self {
        LineDelimiter::Newline
    }
}

/// Everything the search loop needs to run, gathered from CLI flags (or
/// library-default construction) in one place.
#[derive(Debug, Clone)]
pub struct Config {
    pub matcher: MatcherConfig,
    pub query: QueryConfig,
    pub read_delimiter: LineDelimiter,
    pub print_delimiter: LineDelimiter,
    pub header_lines: u32,
    pub field_delimiter: Option<char>,
    pub nth: FieldSpec,
    pub with_nth: FieldSpec,
    pub search_throttle: Duration,
    pub poll_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            matcher: MatcherConfig::DEFAULT,
            query: QueryConfig::default(),
            read_delimiter: LineDelimiter::default(),
            print_delimiter: LineDelimiter::default(),
            header_lines: 0,
            field_delimiter: None,
            nth: FieldSpec::default(),
            with_nth: FieldSpec::default(),
            search_throttle: crate::search::SEARCH_THROTTLE,
            poll_timeout: crate::search::POLL_TIMEOUT,
        }
    }
}
