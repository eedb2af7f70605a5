//! Overlapping windows snapped to natural boundaries.
//!
//! The chunker walks a cursor across the text, cutting one window per step.
//!
//! ## How It Works
//!
//! ```text
//! chunk_size = 20, overlap = 5
//!
//! Document: "Sentence one. Sentence two. Sentence three."
//!
//! Window 0: [0..20)  "Sentence one. Sente"
//!           last '.' at 12 > 20 / 2, snap to [0..13)  "Sentence one."
//! Window 1: [8..28)  next cursor = 13 - 5 = 8
//! ...
//! ```
//!
//! Each step:
//!
//! 1. Cut `[start, start + chunk_size)`, clipped to the text.
//! 2. If the window stops short of the end of the text, ask the
//!    [`Boundary`] for the last break. Snap to it only if the break character
//!    lies past the midpoint of the target size, so a break near the start
//!    of the window can't produce a tiny chunk.
//! 3. Trim, fingerprint, emit. A window that is only whitespace trims to
//!    nothing and is skipped, so no swath ever has empty `text`. The cursor
//!    still moves past it.
//! 4. Stop once a window reaches the end of the text, otherwise move the
//!    cursor to `end - overlap`.
//!
//! ## Termination
//!
//! Snapping can pull `end - overlap` behind the current cursor when the
//! overlap is large relative to the chunk size. The cursor is therefore
//! forced forward by at least one char per step, which bounds the loop by
//! the text length.

use crate::{Boundary, ChunkConfig, Chunker, PeriodOrNewline, Result, Swath};

/// Overlapping window chunker with boundary snapping.
///
/// ## Example
///
/// ```rust
/// use swaths::{Chunker, WindowChunker};
///
/// let chunker = WindowChunker::new(20, 5).unwrap();
/// let swaths = chunker.chunk("Sentence one. Sentence two. Sentence three.");
///
/// assert_eq!(swaths[0].text, "Sentence one.");
/// assert_eq!((swaths[0].start, swaths[0].end), (0, 13));
/// assert_eq!(swaths[1].start, 8); // 13 - 5 overlap
/// ```
#[derive(Debug, Clone)]
pub struct WindowChunker<B = PeriodOrNewline> {
    config: ChunkConfig,
    boundary: B,
}

impl WindowChunker {
    /// Create a chunker that snaps to periods and newlines.
    ///
    /// # Errors
    ///
    /// Returns an error if `chunk_size == 0` or `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        Ok(Self::from_config(ChunkConfig::new(chunk_size, overlap)?))
    }

    /// Create a chunker from an already validated configuration.
    #[must_use]
    pub fn from_config(config: ChunkConfig) -> Self {
        Self {
            config,
            boundary: PeriodOrNewline,
        }
    }
}

impl Default for WindowChunker {
    fn default() -> Self {
        Self::from_config(ChunkConfig::default())
    }
}

impl<B: Boundary> WindowChunker<B> {
    /// Replace the boundary strategy.
    ///
    /// ```rust
    /// use swaths::{Chunker, SentenceBreak, WindowChunker};
    ///
    /// let chunker = WindowChunker::new(30, 5).unwrap().with_boundary(SentenceBreak);
    /// let swaths = chunker.chunk("Pi is about 3.14159 today. Tomorrow it is not.");
    /// assert_eq!(swaths[0].text, "Pi is about 3.14159 today.");
    /// ```
    #[must_use]
    pub fn with_boundary<C: Boundary>(self, boundary: C) -> WindowChunker<C> {
        WindowChunker {
            config: self.config,
            boundary,
        }
    }

    /// The window size and overlap in use.
    #[must_use]
    pub fn config(&self) -> ChunkConfig {
        self.config
    }

    /// End of the window starting at `start`, after clipping and snapping.
    fn window_end(&self, text: &str, start: usize) -> usize {
        let size = self.config.chunk_size();
        let end = floor_char_boundary(text, start.saturating_add(size).min(text.len()));
        if end <= start {
            // chunk_size is narrower than the char at `start`.
            return ceil_char_boundary(text, start + 1);
        }
        if end == text.len() {
            return end;
        }

        match self.boundary.last_break(&text[start..end]) {
            // The boundary char is the one just before `cut`.
            Some(cut) if cut > 0 && cut - 1 > size / 2 => start + cut,
            _ => end,
        }
    }
}

impl<B: Boundary> Chunker for WindowChunker<B> {
    fn chunk(&self, text: &str) -> Vec<Swath> {
        if text.trim().is_empty() {
            return vec![];
        }

        let overlap = self.config.overlap();
        let mut swaths = Vec::with_capacity(self.estimate_chunks(text.len()));
        let mut start = 0;

        while start < text.len() {
            let end = self.window_end(text, start);

            let swath = Swath::from_window(text, start, end);
            if !swath.is_empty() {
                swaths.push(swath);
            }

            if end >= text.len() {
                break;
            }

            let next = end.saturating_sub(overlap).max(start + 1);
            start = ceil_char_boundary(text, next);
        }

        tracing::trace!(
            text_len = text.len(),
            chunk_size = self.config.chunk_size(),
            overlap,
            chunks = swaths.len(),
            "chunked text"
        );

        swaths
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        if text_len == 0 {
            return 0;
        }
        text_len.div_ceil(self.config.step())
    }
}

// Replace str::floor_char_boundary / ceil_char_boundary for MSRV compatibility.
fn floor_char_boundary(text: &str, mut at: usize) -> usize {
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

fn ceil_char_boundary(text: &str, mut at: usize) -> usize {
    while at < text.len() && !text.is_char_boundary(at) {
        at += 1;
    }
    at.min(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SentenceBreak;

    #[test]
    fn test_snaps_to_period_past_midpoint() {
        let chunker = WindowChunker::new(20, 5).unwrap();
        let text = "Sentence one. Sentence two. Sentence three.";
        let swaths = chunker.chunk(text);

        assert_eq!(swaths[0].text, "Sentence one.");
        assert_eq!(swaths[0].start, 0);
        assert_eq!(swaths[0].end, 13);
        assert_eq!(swaths[0].length, 13);
        assert_eq!(swaths[1].start, 8);
    }

    #[test]
    fn test_break_before_midpoint_is_ignored() {
        let chunker = WindowChunker::new(20, 0).unwrap();
        // '.' at index 3 is well before the midpoint.
        let text = "Hi. abcdefghijklmnopqrstuvwxyz";
        let swaths = chunker.chunk(text);

        assert_eq!(swaths[0].end, 20);
        assert_eq!(swaths[0].text, "Hi. abcdefghijklmnop");
    }

    #[test]
    fn test_break_exactly_at_midpoint_is_ignored() {
        let chunker = WindowChunker::new(20, 0).unwrap();
        // '.' at index 10 == 20 / 2, not past it.
        let text = "abcdefghij.klmnopqrstuvwxyz";
        let swaths = chunker.chunk(text);
        assert_eq!(swaths[0].end, 20);

        // '.' at index 11 is past it.
        let text = "abcdefghijk.lmnopqrstuvwxyz";
        let swaths = chunker.chunk(text);
        assert_eq!(swaths[0].end, 12);
    }

    #[test]
    fn test_newline_later_than_period_wins() {
        let chunker = WindowChunker::new(20, 0).unwrap();
        let text = "abcdefghijkl.mnop\nqrstuvwxyz";
        let swaths = chunker.chunk(text);

        assert_eq!(swaths[0].end, 18);
        assert_eq!(swaths[0].text, "abcdefghijkl.mnop");
    }

    #[test]
    fn test_last_window_is_not_snapped() {
        let chunker = WindowChunker::new(100, 10).unwrap();
        let text = "First sentence here. Second sentence is also here. tail";
        let swaths = chunker.chunk(text);

        assert_eq!(swaths.len(), 1);
        assert_eq!(swaths[0].end, text.len());
    }

    #[test]
    fn test_empty_text() {
        let chunker = WindowChunker::default();
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        let chunker = WindowChunker::new(4, 1).unwrap();
        assert!(chunker.chunk("   \n\t   \n ").is_empty());
    }

    #[test]
    fn test_text_smaller_than_chunk() {
        let chunker = WindowChunker::default();
        let swaths = chunker.chunk("  small text.  ");

        assert_eq!(swaths.len(), 1);
        assert_eq!(swaths[0].text, "small text.");
        assert_eq!(swaths[0].start, 0);
        assert_eq!(swaths[0].end, 15);
    }

    #[test]
    fn test_no_boundaries_advance_by_step() {
        let chunker = WindowChunker::default();
        let text = "a".repeat(2500);
        let swaths = chunker.chunk(&text);

        let spans: Vec<_> = swaths.iter().map(Swath::span).collect();
        assert_eq!(spans, vec![0..1000, 800..1800, 1600..2500]);
    }

    #[test]
    fn test_whitespace_window_skipped() {
        let chunker = WindowChunker::new(4, 0).unwrap();
        let text = "abcd        efgh";
        let swaths = chunker.chunk(text);

        let texts: Vec<_> = swaths.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_large_overlap_still_progresses() {
        // Snapping at 12 with overlap 15 would move the cursor backwards.
        let chunker = WindowChunker::new(20, 15).unwrap();
        let text = "Sentence one. Sentence two. Sentence three.";
        let swaths = chunker.chunk(text);

        assert!(!swaths.is_empty());
        for pair in swaths.windows(2) {
            assert!(pair[0].start < pair[1].start);
        }
        assert_eq!(swaths.last().map(|s| s.end), Some(text.len()));
    }

    #[test]
    fn test_unicode_boundaries() {
        let chunker = WindowChunker::new(5, 1).unwrap();
        let text = "a日本語b";
        let swaths = chunker.chunk(text);

        for swath in &swaths {
            assert!(text.is_char_boundary(swath.start));
            assert!(text.is_char_boundary(swath.end));
            assert_eq!(swath.text, text[swath.span()].trim());
        }
    }

    #[test]
    fn test_chunk_size_narrower_than_char() {
        let chunker = WindowChunker::new(1, 0).unwrap();
        let swaths = chunker.chunk("日本");

        let texts: Vec<_> = swaths.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["日", "本"]);
    }

    #[test]
    fn test_sentence_boundary_strategy() {
        let chunker = WindowChunker::new(30, 0).unwrap().with_boundary(SentenceBreak);
        let text = "Version 2.5 shipped. The next release is planned.";
        let swaths = chunker.chunk(text);

        assert_eq!(swaths[0].text, "Version 2.5 shipped.");
        assert_eq!(swaths[0].end, 20);
    }

    #[test]
    fn test_boxed_boundary_strategy() {
        let boundary: Box<dyn Boundary> = Box::new(PeriodOrNewline);
        let chunker = WindowChunker::new(20, 5).unwrap().with_boundary(boundary);
        let swaths = chunker.chunk("Sentence one. Sentence two. Sentence three.");
        assert_eq!(swaths[0].end, 13);
    }

    #[test]
    fn test_estimate_chunks() {
        let chunker = WindowChunker::default();
        assert_eq!(chunker.estimate_chunks(0), 0);
        assert_eq!(chunker.estimate_chunks(2500), 4);
    }
}
