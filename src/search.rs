//! The foreground re-ranking loop: polls the reader for new chunks, and
//! (throttled) re-scores every stored item against the current pattern.

use std::time::{Duration, Instant};

use needlefind_matcher::{Matcher, MatcherConfig, Pattern};

use crate::chunk::Chunk;
use crate::item::Item;
use crate::reader::ReaderHandle;
use crate::topk::{ScoredMatch, TopK, MAX_RESULTS};

/// Minimum interval between full re-rank passes while input is still
/// streaming or the query is being edited rapidly.
pub const SEARCH_THROTTLE: Duration = Duration::from_millis(50);

/// How long [`SearchState::poll`] blocks waiting for reader progress when
/// there is nothing else to do.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// A single search result ready for the renderer: the matched item and its
/// score/highlight indices (empty for the header rows and the no-pattern
/// "show everything" mode).
pub struct Hit<'a> {
    pub item: &'a Item,
    pub score: u32,
    pub indices: &'a [u32],
}

pub struct SearchState {
    chunks: Vec<Chunk>,
    total_items: u32,
    header_lines: u32,
    matcher: Matcher,
    pattern: Pattern,
    results: Vec<ScoredMatch>,
    last_rerank: Option<Instant>,
    dirty: bool,
    search_throttle: Duration,
}

impl SearchState {
    pub fn new(matcher_config: MatcherConfig, header_lines: u32) -> Self {
        SearchState::with_throttle(matcher_config, header_lines, SEARCH_THROTTLE)
    }

    /// Like [`SearchState::new`], but with an explicit re-rank throttle
    /// instead of the default, for callers that expose it as a tunable
    /// (see [`crate::config::Config::search_throttle`]).
    pub fn with_throttle(matcher_config: MatcherConfig, header_lines: u32, search_throttle: Duration) -> Self {
        SearchState {
            chunks: Vec::new(),
            total_items: 0,
            header_lines,
            matcher: Matcher::new(matcher_config),
            pattern: Pattern::default(),
            results: Vec::new(),
            last_rerank: None,
            dirty: true,
            search_throttle,
        }
    }

    /// Replaces the active pattern; the next [`SearchState::poll`] call
    /// will trigger a full re-rank.
    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.pattern = pattern;
        self.dirty = true;
    }

    /// Drains newly published chunks from `reader` into the item store and
    /// marks the state dirty so the next poll re-ranks them in.
    pub fn ingest(&mut self, reader: &ReaderHandle) {
        let new_chunks = reader.drain();
        if new_chunks.is_empty() {
            return;
        }
        for chunk in new_chunks {
            self.total_items += chunk.len() as u32;
            self.chunks.push(chunk);
        }
        self.dirty = true;
    }

    /// Runs a throttled re-rank if the state is dirty and the throttle
    /// window has elapsed. Returns whether the result set actually changed.
    pub fn poll(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        if let Some(last) = self.last_rerank {
            if last.elapsed() < self.search_throttle {
                return false;
            }
        }
        self.rerank();
        true
    }

    fn rerank(&mut self) {
        self.last_rerank = Some(Instant::now());
        self.dirty = false;

        if self.pattern.is_empty() {
            // show-all mode: the renderer reads straight from the chunk
            // list, nothing to score here.
            self.results.clear();
            return;
        }

        let mut top_k = TopK::new(MAX_RESULTS);
        let mut indices = Vec::new();
        for chunk in &self.chunks {
            for item in chunk.items() {
                if item.is_header(self.header_lines) {
                    continue;
                }
                indices.clear();
                let haystack = item.match_text.slice(..);
                let Some(score) = self.pattern.indices(haystack, &mut self.matcher, &mut indices) else {
                    continue;
                };
                top_k.consider(ScoredMatch { item_id: item.id, score, indices: indices.clone() });
            }
        }
        self.results = top_k.into_sorted();
    }

    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    pub fn matched_count(&self) -> usize {
        self.results.len()
    }

    /// The current sorted result set, resolving each match back to its item.
    pub fn hits(&self) -> impl Iterator<Item = Hit<'_>> {
        self.results.iter().filter_map(move |m| {
            self.find_item(m.item_id).map(|item| Hit { item, score: m.score, indices: &m.indices })
        })
    }

    fn find_item(&self, id: u32) -> Option<&Item> {
        // items are appended in id order across chunks; a linear scan over
        // chunks (not items) keeps this cheap relative to a full rescan
        for chunk in &self.chunks {
            if let Some(item) = chunk.items().iter().find(|item| item.id == id) {
                return Some(item);
            }
        }
        None
    }

    /// All non-header items in producer order, for "show-all" (empty
    /// pattern) mode.
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        let header_lines = self.header_lines;
        self.chunks.iter().flat_map(|chunk| chunk.items()).filter(move |item| !item.is_header(header_lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use needlefind_matcher::{CaseMatching, Normalization};
    use std::io::Cursor;

    fn drive(input: &str, query: &str) -> Vec<String> {
        let reader = ReaderHandle::spawn(Cursor::new(input.as_bytes().to_vec()), crate::reader::ReaderConfig::default());
        let mut state = SearchState::new(MatcherConfig::DEFAULT, 0);
        loop {
            state.ingest(&reader);
            if reader.finished() {
                break;
            }
            reader.wait(POLL_TIMEOUT);
        }
        state.set_pattern(Pattern::parse(CaseMatching::Smart, Normalization::Smart, query));
        while state.poll() {}
        state.hits().map(|hit| hit.item.original.to_string()).collect()
    }

    #[test]
    fn reranks_ingested_lines_against_the_pattern() {
        let results = drive("foo\nbar\nfoobar\n", "foo");
        assert_eq!(results, vec!["foobar".to_string(), "foo".to_string()]);
    }

    #[test]
    fn empty_pattern_matches_nothing_in_the_scored_result_set() {
        let results = drive("foo\nbar\n", "");
        assert!(results.is_empty());
    }
}
