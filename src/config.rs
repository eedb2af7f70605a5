//! Chunking and processing configuration.
//!
//! ## Size and Overlap
//!
//! Two numbers drive the window chunker:
//!
//! - `chunk_size`: the target window length in bytes. Windows never exceed
//!   it, except that a window always holds at least one char: with a
//!   `chunk_size` narrower than a multibyte char, that whole char is taken.
//! - `overlap`: how much of the previous window the next one re-reads.
//!
//! ```text
//! chunk_size = 1000, overlap = 200, text of 2500 bytes
//!
//! [0 ............ 1000)
//!             [800 ............ 1800)
//!                         [1600 ........ 2500)   <- clipped to the text
//! ```
//!
//! Overlap must stay strictly below the chunk size, otherwise the cursor
//! could stall or walk backwards. Both constructors and deserialization
//! reject such configurations.
//!
//! ## Processor Configuration
//!
//! [`ProcessorConfig`] is loaded from TOML:
//!
//! ```toml
//! upload_dir = "./uploads"
//! boundary = "period-newline"   # or "sentence"
//!
//! [chunking]
//! chunk_size = 1000
//! overlap = 200
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Default target window length.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Default overlap between consecutive windows.
pub const DEFAULT_OVERLAP: usize = 200;

/// Validated window size and overlap.
///
/// # Examples
///
/// ```rust
/// use swaths::ChunkConfig;
///
/// let config = ChunkConfig::default();
/// assert_eq!(config.chunk_size(), 1000);
/// assert_eq!(config.overlap(), 200);
/// assert_eq!(config.step(), 800);
///
/// assert!(ChunkConfig::new(100, 100).is_err());
/// assert!(ChunkConfig::new(0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawChunkConfig")]
pub struct ChunkConfig {
    chunk_size: usize,
    overlap: usize,
}

impl ChunkConfig {
    /// Create a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `chunk_size == 0` and
    /// [`Error::OverlapExceedsSize`] if `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidChunkSize(chunk_size));
        }
        if overlap >= chunk_size {
            return Err(Error::OverlapExceedsSize {
                size: chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Create a configuration with no overlap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `chunk_size == 0`.
    pub fn no_overlap(chunk_size: usize) -> Result<Self> {
        Self::new(chunk_size, 0)
    }

    /// The target window length.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Code units shared by consecutive windows.
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between window starts when no snapping occurs.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

#[derive(Deserialize)]
struct RawChunkConfig {
    #[serde(default = "default_chunk_size")]
    chunk_size: usize,
    #[serde(default = "default_overlap")]
    overlap: usize,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_overlap() -> usize {
    DEFAULT_OVERLAP
}

impl TryFrom<RawChunkConfig> for ChunkConfig {
    type Error = Error;

    fn try_from(raw: RawChunkConfig) -> Result<Self> {
        Self::new(raw.chunk_size, raw.overlap)
    }
}

/// Which boundary strategy the processor's chunker snaps to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryKind {
    /// Last `.` or `\n` in the window.
    #[default]
    PeriodNewline,
    /// Last UAX #29 sentence break in the window.
    Sentence,
}

/// Configuration for [`KnowledgeProcessor`](crate::KnowledgeProcessor).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessorConfig {
    /// Window size and overlap.
    #[serde(default)]
    pub chunking: ChunkConfig,
    /// Directory that `/uploads/...` file references resolve against.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Boundary strategy used when snapping window ends.
    #[serde(default)]
    pub boundary: BoundaryKind,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            chunking: ChunkConfig::default(),
            upload_dir: default_upload_dir(),
            boundary: BoundaryKind::default(),
        }
    }
}

impl ProcessorConfig {
    /// Parse a configuration from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML or invalid chunk settings.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }
}
