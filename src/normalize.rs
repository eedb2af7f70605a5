//! Text normalizers: turning a knowledge source into plain text.
//!
//! Every source kind a knowledge base accepts needs its own extraction:
//!
//! ```text
//!   URL ──┐
//!   TEXT ─┤
//!   PDF ──┤                ┌────────────┐
//!   DOCX ─┼─▶ Normalizers ─▶  plain text ─▶ Chunker
//!   TXT ──┤                └────────────┘
//!   CSV ──┤
//!   JSON ─┘
//! ```
//!
//! [`Normalizers`] is the capability set: one [`Normalizer`] per
//! [`SourceKind`]. Inline text and plain UTF-8 files are handled out of the
//! box. Fetching web pages and parsing binary or structured formats is left
//! to adapters the caller registers:
//!
//! ```rust
//! use swaths::{ExtractError, Normalizer, Normalizers, Source, SourceKind};
//!
//! struct CannedPage;
//!
//! impl Normalizer for CannedPage {
//!     fn kind(&self) -> SourceKind {
//!         SourceKind::Url
//!     }
//!
//!     fn extract(&self, source: &Source<'_>) -> Result<String, ExtractError> {
//!         Ok(format!("contents of {}", source.url()))
//!     }
//! }
//!
//! let mut normalizers = Normalizers::default();
//! assert!(!normalizers.supports(SourceKind::Url));
//!
//! normalizers.register(Box::new(CannedPage));
//! let source = Source::new(SourceKind::Url, "https://example.com");
//! assert_eq!(
//!     normalizers.extract(&source).unwrap(),
//!     "contents of https://example.com"
//! );
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Path prefix that file references use for uploaded files.
const UPLOADS_PREFIX: &str = "/uploads/";

/// The kinds of knowledge source an item can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A web page, fetched by URL.
    Url,
    /// Inline text carried by the item itself.
    Text,
    /// An uploaded PDF document.
    Pdf,
    /// An uploaded Word document.
    Docx,
    /// An uploaded plain text file.
    Txt,
    /// An uploaded CSV file.
    Csv,
    /// An uploaded JSON file.
    Json,
}

impl SourceKind {
    /// All kinds, in declaration order.
    pub const ALL: [SourceKind; 7] = [
        SourceKind::Url,
        SourceKind::Text,
        SourceKind::Pdf,
        SourceKind::Docx,
        SourceKind::Txt,
        SourceKind::Csv,
        SourceKind::Json,
    ];

    /// The upper-case tag used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Url => "URL",
            SourceKind::Text => "TEXT",
            SourceKind::Pdf => "PDF",
            SourceKind::Docx => "DOCX",
            SourceKind::Txt => "TXT",
            SourceKind::Csv => "CSV",
            SourceKind::Json => "JSON",
        }
    }

    /// Whether the source lives in an uploaded file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        !matches!(self, SourceKind::Url | SourceKind::Text)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    /// Parse a kind tag, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// A borrowed description of where a knowledge item's text lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source<'a> {
    /// What kind of source this is.
    pub kind: SourceKind,
    /// Inline content. For URL sources, the fallback URL.
    pub content: &'a str,
    /// Explicit URL for web sources.
    pub source_url: Option<&'a str>,
    /// File reference for uploaded sources.
    pub file_path: Option<&'a str>,
}

impl<'a> Source<'a> {
    /// A source with inline content only.
    #[must_use]
    pub fn new(kind: SourceKind, content: &'a str) -> Self {
        Self {
            kind,
            content,
            source_url: None,
            file_path: None,
        }
    }

    /// Attach a URL.
    #[must_use]
    pub fn with_url(mut self, url: Option<&'a str>) -> Self {
        self.source_url = url;
        self
    }

    /// Attach a file reference.
    #[must_use]
    pub fn with_file(mut self, path: Option<&'a str>) -> Self {
        self.file_path = path;
        self
    }

    /// The URL to fetch: the explicit URL, else the inline content.
    #[must_use]
    pub fn url(&self) -> &'a str {
        self.source_url
            .filter(|url| !url.is_empty())
            .unwrap_or(self.content)
    }

    /// The file reference, required for uploaded kinds.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingReference`] when no path was given.
    pub fn file_reference(&self) -> Result<&'a str, ExtractError> {
        self.file_path
            .filter(|path| !path.is_empty())
            .ok_or(ExtractError::MissingReference {
                kind: self.kind,
                field: "file path",
            })
    }
}

/// Errors raised while extracting text from a source.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// No adapter handles this kind.
    #[error("no normalizer registered for {0} sources")]
    NoNormalizer(SourceKind),

    /// The source lacks the reference its kind needs.
    #[error("{kind} source has no {field}")]
    MissingReference {
        /// The source kind.
        kind: SourceKind,
        /// The missing field.
        field: &'static str,
    },

    /// Reading the underlying file failed.
    #[error("failed to read {kind} source {}: {source}", .path.display())]
    Io {
        /// The source kind.
        kind: SourceKind,
        /// The resolved path.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An adapter failed for its own reasons.
    #[error("failed to extract text from {kind}: {message}")]
    Failed {
        /// The source kind.
        kind: SourceKind,
        /// What went wrong.
        message: String,
    },
}

impl ExtractError {
    /// Wrap an adapter-specific failure.
    pub fn failed(kind: SourceKind, cause: impl fmt::Display) -> Self {
        ExtractError::Failed {
            kind,
            message: cause.to_string(),
        }
    }

    /// The kind of source that failed.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            ExtractError::NoNormalizer(kind)
            | ExtractError::MissingReference { kind, .. }
            | ExtractError::Io { kind, .. }
            | ExtractError::Failed { kind, .. } => *kind,
        }
    }
}

/// Extracts plain text from one kind of source.
pub trait Normalizer: Send + Sync {
    /// The source kind this normalizer handles.
    fn kind(&self) -> SourceKind;

    /// Produce the plain text for `source`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] tagged with [`kind`](Self::kind) when the
    /// source lacks the reference this normalizer needs, when reading it
    /// fails, or when the content cannot be turned into text.
    fn extract(&self, source: &Source<'_>) -> Result<String, ExtractError>;
}

/// Passes inline text through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineText;

impl Normalizer for InlineText {
    fn kind(&self) -> SourceKind {
        SourceKind::Text
    }

    fn extract(&self, source: &Source<'_>) -> Result<String, ExtractError> {
        Ok(source.content.to_string())
    }
}

/// Reads an uploaded UTF-8 text file.
///
/// References starting with `/uploads/` resolve against the upload
/// directory; anything else is used as a path as-is.
#[derive(Debug, Clone)]
pub struct PlainTextFile {
    upload_dir: PathBuf,
}

impl PlainTextFile {
    /// Create a reader rooted at `upload_dir`.
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Map a file reference onto the local filesystem.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> PathBuf {
        match reference.strip_prefix(UPLOADS_PREFIX) {
            Some(relative) => self.upload_dir.join(relative),
            None => PathBuf::from(reference),
        }
    }
}

impl Normalizer for PlainTextFile {
    fn kind(&self) -> SourceKind {
        SourceKind::Txt
    }

    fn extract(&self, source: &Source<'_>) -> Result<String, ExtractError> {
        let path = self.resolve(source.file_reference()?);
        std::fs::read_to_string(&path).map_err(|source| ExtractError::Io {
            kind: SourceKind::Txt,
            path,
            source,
        })
    }
}

/// The set of normalizers, at most one per source kind.
pub struct Normalizers {
    by_kind: HashMap<SourceKind, Box<dyn Normalizer>>,
}

impl Normalizers {
    /// An empty set. Every extraction fails until adapters are registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_kind: HashMap::new(),
        }
    }

    /// The built-in adapters, with uploads resolved against `upload_dir`.
    pub fn with_upload_dir(upload_dir: impl AsRef<Path>) -> Self {
        let mut normalizers = Self::new();
        normalizers.register(Box::new(InlineText));
        normalizers.register(Box::new(PlainTextFile::new(upload_dir.as_ref())));
        normalizers
    }

    /// Add a normalizer, replacing any previous one for the same kind.
    pub fn register(&mut self, normalizer: Box<dyn Normalizer>) {
        let kind = normalizer.kind();
        if self.by_kind.insert(kind, normalizer).is_some() {
            tracing::debug!(%kind, "replaced normalizer");
        }
    }

    /// Whether a normalizer is registered for `kind`.
    #[must_use]
    pub fn supports(&self, kind: SourceKind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    /// Extract the text of `source` with the matching normalizer.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::NoNormalizer`] if the kind is not registered,
    /// otherwise whatever the normalizer reports.
    pub fn extract(&self, source: &Source<'_>) -> Result<String, ExtractError> {
        let normalizer = self
            .by_kind
            .get(&source.kind)
            .ok_or(ExtractError::NoNormalizer(source.kind))?;
        let text = normalizer.extract(source)?;
        tracing::debug!(kind = %source.kind, bytes = text.len(), "extracted text");
        Ok(text)
    }
}

impl Default for Normalizers {
    fn default() -> Self {
        Self::with_upload_dir("./uploads")
    }
}

impl fmt::Debug for Normalizers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.by_kind.keys().map(SourceKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("Normalizers").field("kinds", &kinds).finish()
    }
}
