//! # swaths
//!
//! Overlapping, boundary-snapped text chunking for knowledge ingestion.
//!
//! ## The Problem
//!
//! A knowledge base takes in web pages, pasted text and uploaded files. Before
//! any of it can be embedded it has to become a list of pieces: small enough
//! for an embedding model, large enough to mean something, and overlapping so
//! nothing is lost at the seams.
//!
//! This crate cuts those pieces ("swaths"):
//!
//! ```text
//! Document: "Sentence one. Sentence two. Sentence three."
//! Size: 20, Overlap: 5
//!
//! Swath 0: "Sentence one."          [0..13)   <- snapped to the period
//! Swath 1: "one. Sentence two."     [8..27)   <- re-reads 5 bytes
//! Swath 2: "two. Sentence three"    [22..42)  <- '.' too early to snap
//! Swath 3: "three."                 [37..43)
//! ```
//!
//! ## The Algorithm
//!
//! A cursor walks the text. Each step cuts a window of `chunk_size` bytes,
//! pulls its end back to the last period or newline when that keeps more than
//! half of the window, trims it, fingerprints it and moves the cursor to
//! `end - overlap`. See [`WindowChunker`] for the details and [`Boundary`] for
//! plugging in a different notion of "natural break".
//!
//! ## Quick Start
//!
//! ```rust
//! use swaths::{Chunker, WindowChunker};
//!
//! // The free function uses the period/newline boundary.
//! let swaths = swaths::chunk("Short note.", 1000, 200).unwrap();
//! assert_eq!(swaths.len(), 1);
//! assert_eq!(swaths[0].chunk_id.len(), 8);
//!
//! // Or keep a configured chunker around.
//! let chunker = WindowChunker::default(); // 1000 / 200
//! let swaths = chunker.chunk("Short note.");
//! assert_eq!(swaths[0].text, "Short note.");
//! ```
//!
//! ## From Knowledge Items
//!
//! [`KnowledgeProcessor`] wraps the chunker with text extraction:
//!
//! ```rust
//! use swaths::{KnowledgeItem, KnowledgeProcessor};
//!
//! let processor = KnowledgeProcessor::default();
//! let item = KnowledgeItem::text("kb-1", "bot-7", "Refunds take 5 days.");
//! let result = processor.process(&item);
//!
//! assert!(result.success);
//! assert_eq!(result.vector_data.as_deref(), Some("simulated_vector_data_kb-1"));
//! ```
//!
//! Extraction for URLs, PDFs and office formats is not built in; adapters
//! implement [`Normalizer`] and are registered on [`Normalizers`].

mod boundary;
mod config;
mod error;
mod normalize;
mod process;
mod swath;
mod window;

pub use boundary::{Boundary, PeriodOrNewline, SentenceBreak};
pub use config::{
    BoundaryKind, ChunkConfig, ProcessorConfig, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP,
};
pub use error::{Error, Result};
pub use normalize::{
    ExtractError, InlineText, Normalizer, Normalizers, PlainTextFile, Source, SourceKind,
};
pub use process::{KnowledgeItem, KnowledgeProcessor, ProcessError, ProcessingResult};
pub use swath::Swath;
pub use window::WindowChunker;

/// A text chunking strategy.
///
/// Chunkers are pure: the same text always yields the same swaths, and a
/// chunker can be shared across threads.
///
/// ```rust
/// use swaths::{Chunker, SentenceBreak, WindowChunker};
///
/// fn chunk_document(chunker: &dyn Chunker, text: &str) -> Vec<swaths::Swath> {
///     chunker.chunk(text)
/// }
///
/// let plain = WindowChunker::new(100, 20).unwrap();
/// let sentences = WindowChunker::new(100, 20).unwrap().with_boundary(SentenceBreak);
///
/// let text = "Hello world. This is a test.";
/// let a = chunk_document(&plain, text);
/// let b = chunk_document(&sentences, text);
/// assert_eq!(a, b);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into swaths, in document order.
    ///
    /// Empty or whitespace-only text yields no swaths, and no returned swath
    /// has empty `text`: windows that hold only whitespace are dropped rather
    /// than emitted empty.
    fn chunk(&self, text: &str) -> Vec<Swath>;

    /// Estimate the number of chunks for a given text length.
    ///
    /// Useful for pre-allocation. May be approximate.
    ///
    /// [`WindowChunker`] derives an exact-step estimate from its config.
    /// Chunkers implemented outside this crate get this default, which
    /// assumes roughly 500 bytes per chunk and never returns zero.
    fn estimate_chunks(&self, text_len: usize) -> usize {
        (text_len / 500).max(1)
    }
}

/// Chunk `text` into overlapping windows of `chunk_size` bytes.
///
/// Shorthand for `WindowChunker::new(chunk_size, overlap)?.chunk(text)`.
///
/// # Errors
///
/// Returns [`Error::InvalidChunkSize`] if `chunk_size == 0` and
/// [`Error::OverlapExceedsSize`] if `overlap >= chunk_size`.
///
/// ```rust
/// let swaths = swaths::chunk(&"a".repeat(2500), 1000, 200).unwrap();
/// let starts: Vec<_> = swaths.iter().map(|s| s.start).collect();
/// assert_eq!(starts, vec![0, 800, 1600]);
///
/// assert!(swaths::chunk("text", 10, 10).is_err());
/// ```
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Swath>> {
    Ok(WindowChunker::new(chunk_size, overlap)?.chunk(text))
}
