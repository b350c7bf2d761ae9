//! A fuzzy-matching core and streaming top-K selection pipeline.
//!
//! [`needlefind_matcher`] does the scoring; everything in this crate sits
//! above it: a line reader that streams input into [`Chunk`](chunk::Chunk)s
//! on a background thread, a throttled re-rank loop that keeps only the
//! best [`topk::MAX_RESULTS`] matches, and the glue ([`config`], [`query`],
//! [`field`]) that turns CLI-shaped input into the matcher's types.
//!
//! The crate is built to be driven two ways: embedded as a library (build a
//! [`config::Config`], spawn a [`reader::ReaderHandle`], drive a
//! [`search::SearchState`] yourself), or through the `nlf` binary behind the
//! `cli` feature.

#[cfg(feature = "cli")]
pub mod cli;
pub mod chunk;
pub mod config;
pub mod error;
pub mod field;
pub mod item;
pub mod query;
pub mod reader;
pub mod search;
pub mod topk;

pub use error::NeedlefindError;
pub use item::Item;
pub use needlefind_matcher::{CaseMatching, Matcher, MatcherConfig, Normalization, Pattern};
pub use search::{Hit, SearchState};

use std::io::Read;

use config::Config;
use reader::{ReaderConfig, ReaderHandle};

/// Wires a [`ReaderHandle`] and a [`SearchState`] together from a single
/// [`Config`], the common case for embedding the pipeline without touching
/// its pieces individually.
pub struct Session {
    pub reader: ReaderHandle,
    pub state: SearchState,
}

impl Session {
    pub fn spawn(source: impl Read + Send + 'static, config: &Config) -> Self {
        let reader_config = ReaderConfig {
            line_delimiter: config.read_delimiter.byte(),
            field_delimiter: config.field_delimiter,
            nth: config.nth.clone(),
            with_nth: config.with_nth.clone(),
        };
        let reader = ReaderHandle::spawn(source, reader_config);
        let state = SearchState::with_throttle(config.matcher, config.header_lines, config.search_throttle);
        Session { reader, state }
    }

    /// Runs the reader to completion, re-ranking against `pattern` after
    /// every batch, and returns the final sorted hits as owned strings.
    /// Intended for the non-interactive `-f`/`--filter` mode; an interactive
    /// frontend would instead drive `reader`/`state` directly from its own
    /// event loop.
    pub fn filter(mut self, pattern: Pattern, poll_timeout: std::time::Duration) -> Result<Vec<String>, NeedlefindError> {
        let pattern_is_empty = pattern.is_empty();
        self.state.set_pattern(pattern);
        loop {
            self.state.ingest(&self.reader);
            if self.reader.finished() {
                break;
            }
            self.reader.wait(poll_timeout);
        }
        if let Some(err) = self.reader.take_error() {
            return Err(NeedlefindError::Input(err));
        }
        while self.state.poll() {}
        if pattern_is_empty {
            return Ok(self.state.all_items().map(|item| item.original.to_string()).collect());
        }
        Ok(self.state.hits().map(|hit| hit.item.original.to_string()).collect())
    }
}
