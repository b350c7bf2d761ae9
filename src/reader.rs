//! A single background thread that reads delimited lines from an arbitrary
//! `Read`, projects match/display text per the configured field specs, and
//! publishes completed [`Chunk`]s through a mutex/condvar queue.
//!
//! The producer never holds the queue mutex across a blocking read; the
//! consumer never blocks the producer by holding it either, beyond the
//! instant required to push or pop a chunk.

use std::collections::VecDeque;
use std::io::{self, BufReader, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Condvar, Mutex};

use needlefind_matcher::Utf32String;

use crate::chunk::{Chunk, ChunkBuilder};
use crate::field::{split_fields, FieldSpec};
use crate::item::Item;

struct Shared {
    queue: Mutex<VecDeque<Chunk>>,
    condvar: Condvar,
    done: AtomicBool,
    error: Mutex<Option<io::Error>>,
}

/// Handle to a running reader thread. Dropping it does not stop the reader;
/// call [`ReaderHandle::cancel`] and join for a clean shutdown.
pub struct ReaderHandle {
    shared: Arc<Shared>,
    join: Option<JoinHandle<()>>,
}

/// Line- and field-splitting configuration the reader applies while
/// building items.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub line_delimiter: u8,
    pub field_delimiter: Option<char>,
    pub nth: FieldSpec,
    pub with_nth: FieldSpec,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig { line_delimiter: b'\n', field_delimiter: None, nth: FieldSpec::default(), with_nth: FieldSpec::default() }
    }
}

impl ReaderHandle {
    /// Spawns the background producer. `source` is read to completion (or
    /// until `cancel` is called); `config` controls line/field splitting.
    pub fn spawn(mut source: impl Read + Send + 'static, config: ReaderConfig) -> Self {
        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            done: AtomicBool::new(false),
            error: Mutex::new(None),
        });
        let worker_shared = shared.clone();
        let join = std::thread::Builder::new()
            .name("needlefind-reader".into())
            .spawn(move || run(&mut source, &config, &worker_shared))
            .expect("failed to spawn reader thread");
        ReaderHandle { shared, join: Some(join) }
    }

    /// Drains every chunk currently queued without blocking.
    pub fn drain(&self) -> Vec<Chunk> {
        self.shared.queue.lock().drain(..).collect()
    }

    /// True once the producer has hit EOF, errored, or been canceled and
    /// has no more chunks left to drain.
    pub fn finished(&self) -> bool {
        self.shared.done.load(Ordering::Acquire) && self.shared.queue.lock().is_empty()
    }

    pub fn take_error(&self) -> Option<io::Error> {
        self.shared.error.lock().take()
    }

    /// Requests the producer stop at the next read or chunk boundary.
    pub fn cancel(&self) {
        self.shared.done.store(true, Ordering::Release);
        self.shared.condvar.notify_all();
    }

    /// Blocks until a new chunk is published or the producer finishes,
    /// whichever happens first.
    pub fn wait(&self, timeout: std::time::Duration) {
        let mut queue = self.shared.queue.lock();
        if !queue.is_empty() || self.shared.done.load(Ordering::Acquire) {
            return;
        }
        self.shared.condvar.wait_for(&mut queue, timeout);
    }
}

impl Drop for ReaderHandle {
    fn drop(&mut self) {
        self.cancel();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

fn run(source: &mut dyn Read, config: &ReaderConfig, shared: &Shared) {
    let mut reader = BufReader::new(source);
    let mut builder = ChunkBuilder::default();
    let mut next_id = 0u32;
    let mut line = Vec::new();
    loop {
        if shared.done.load(Ordering::Acquire) {
            log::debug!("reader canceled after {next_id} lines");
            break;
        }
        line.clear();
        match io::BufRead::read_until(&mut reader, config.line_delimiter, &mut line) {
            Ok(0) => {
                publish(shared, &mut builder);
                shared.done.store(true, Ordering::Release);
                shared.condvar.notify_all();
                return;
            }
            Ok(_) => {
                if line.last() == Some(&config.line_delimiter) {
                    line.pop();
                    // a '\n' delimiter leaves a CRLF file's '\r' behind; a
                    // NUL or other custom delimiter has no such convention.
                    if config.line_delimiter == b'\n' && line.last() == Some(&b'\r') {
                        line.pop();
                    }
                }
                let text = String::from_utf8_lossy(&line);
                builder.push(build_item(next_id, &text, config));
                next_id += 1;
                if builder.should_flush() {
                    publish(shared, &mut builder);
                }
            }
            Err(err) => {
                log::warn!("input read error after {next_id} lines: {err}");
                *shared.error.lock() = Some(err);
                publish(shared, &mut builder);
                shared.done.store(true, Ordering::Release);
                shared.condvar.notify_all();
                return;
            }
        }
    }
}

fn publish(shared: &Shared, builder: &mut ChunkBuilder) {
    if builder.is_empty() {
        return;
    }
    let chunk = std::mem::take(builder).finish();
    shared.queue.lock().push_back(chunk);
    shared.condvar.notify_all();
}

fn build_item(id: u32, line: &str, config: &ReaderConfig) -> Item {
    let fields = split_fields(line, config.field_delimiter);
    let match_text = if config.nth.is_identity() { line.to_owned() } else { config.nth.project(&fields) };
    let display_text = if config.with_nth.is_identity() { line.to_owned() } else { config.with_nth.project(&fields) };
    Item {
        id,
        match_text: Utf32String::from(match_text),
        display_text: Utf32String::from(display_text),
        original: line.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drive(source: &[u8], config: ReaderConfig) -> Vec<String> {
        let reader = ReaderHandle::spawn(Cursor::new(source.to_vec()), config);
        let mut items = Vec::new();
        loop {
            items.extend(reader.drain().iter().flat_map(|chunk| chunk.items().to_vec()));
            if reader.finished() {
                items.extend(reader.drain().iter().flat_map(|chunk| chunk.items().to_vec()));
                break;
            }
            reader.wait(std::time::Duration::from_millis(10));
        }
        items.into_iter().map(|item| item.original.to_string()).collect()
    }

    #[test]
    fn splits_on_newline_and_strips_trailing_crlf() {
        let lines = drive(b"foo\r\nbar\nbaz", ReaderConfig::default());
        assert_eq!(lines, vec!["foo".to_string(), "bar".to_string(), "baz".to_string()]);
    }

    #[test]
    fn read0_splits_on_nul_and_does_not_leave_an_embedded_nul() {
        let config = ReaderConfig { line_delimiter: 0, ..ReaderConfig::default() };
        let lines = drive(b"foo\0bar\0baz", config);
        assert_eq!(lines, vec!["foo".to_string(), "bar".to_string(), "baz".to_string()]);
        for line in &lines {
            assert!(!line.contains('\0'));
        }
    }
}
