//! Boundary strategies for snapping window ends.
//!
//! A window cut at exactly `chunk_size` bytes usually lands mid-sentence.
//! Before emitting a window that does not reach the end of the document,
//! the chunker asks a [`Boundary`] where the last natural break inside the
//! window is, and moves the window end there if that keeps more than half
//! of the target size.
//!
//! ```text
//! chunk_size = 20
//!
//! "Sentence one. Sentence two. Sentence three."
//!  [0 ............... 20)
//!  "Sentence one. Sente"
//!               ^ last '.' at 12, past the midpoint (10)
//!  [0 ......... 13)  <- snapped
//! ```
//!
//! Two strategies ship with the crate:
//!
//! | Strategy | Break points | Cost |
//! |----------|--------------|------|
//! | [`PeriodOrNewline`] | last `.` or `\n` | O(window) |
//! | [`SentenceBreak`] | UAX #29 sentence ends | O(window), heavier constant |
//!
//! The first is the default. It happily splits "Dr. Smith" or "3.14"; the
//! second knows better at some extra cost.

use unicode_segmentation::UnicodeSegmentation;

/// Finds the last natural break inside a window.
pub trait Boundary: Send + Sync {
    /// Exclusive byte offset just past the last break in `window`.
    ///
    /// Returns `None` when the window contains no break at all. The returned
    /// offset must lie on a char boundary and be in `1..=window.len()`.
    fn last_break(&self, window: &str) -> Option<usize>;
}

impl<B: Boundary + ?Sized> Boundary for Box<B> {
    fn last_break(&self, window: &str) -> Option<usize> {
        (**self).last_break(window)
    }
}

/// Breaks after the later of the last period and the last newline.
///
/// ```rust
/// use swaths::{Boundary, PeriodOrNewline};
///
/// assert_eq!(PeriodOrNewline.last_break("One. Two\nThr"), Some(9));
/// assert_eq!(PeriodOrNewline.last_break("no breaks"), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodOrNewline;

impl Boundary for PeriodOrNewline {
    fn last_break(&self, window: &str) -> Option<usize> {
        let period = window.rfind('.');
        let newline = window.rfind('\n');
        // Both are single-byte, so +1 stays on a char boundary.
        period.max(newline).map(|at| at + 1)
    }
}

/// Breaks after the last complete sentence, using Unicode segmentation.
///
/// The sentence still running at the end of the window is treated as
/// incomplete; the cut lands after the final non-whitespace character of the
/// sentence before it.
///
/// ```rust
/// use swaths::{Boundary, SentenceBreak};
///
/// let window = "Dr. Smith arrived. He sat down and";
/// assert_eq!(SentenceBreak.last_break(window), Some(18));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceBreak;

impl Boundary for SentenceBreak {
    fn last_break(&self, window: &str) -> Option<usize> {
        let (last_start, _) = window.split_sentence_bound_indices().last()?;
        if last_start == 0 {
            return None;
        }
        let head = window[..last_start].trim_end();
        (!head.is_empty()).then_some(head.len())
    }
}
