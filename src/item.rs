//! The unit of selection: a line of input plus its matchable and
//! displayable projections.

use needlefind_matcher::Utf32String;

/// A single candidate line. Fields are owned by the [`Chunk`](crate::chunk::Chunk)
/// that produced this item and live exactly as long as it.
#[derive(Debug, Clone)]
pub struct Item {
    /// Monotonic, producer-assigned. Stable across re-ranks; `id < header_lines`
    /// marks a header item that is never scored.
    pub id: u32,
    /// What the matcher scores against (after `--nth` projection).
    pub match_text: Utf32String,
    /// What the renderer shows (after `--with-nth` projection, or the full
    /// line when unset).
    pub display_text: Utf32String,
    /// The full original line, emitted verbatim on accept.
    pub original: Box<str>,
}

impl Item {
    pub fn is_header(&self, header_lines: u32) -> bool {
        self.id < header_lines
    }
}
