//! Knowledge item processing: extraction, chunking and result assembly.
//!
//! ```text
//! KnowledgeItem ─▶ SourceKind ─▶ Normalizers ─▶ text ─▶ Chunker ─▶ ProcessingResult
//!                      │              │           │
//!                      └── failure ───┴── blank ──┴──▶ ProcessingResult { success: false }
//! ```
//!
//! [`KnowledgeProcessor::process`] never returns an error and never panics on
//! bad input: every failure becomes a result with `success: false` and a
//! message, with the elapsed time still reported. Embedding is not performed;
//! successful results carry a placeholder marker in `vector_data`.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::{
    BoundaryKind, Chunker, ExtractError, Normalizers, ProcessorConfig, SentenceBreak, Source,
    SourceKind, Swath, WindowChunker,
};

/// A knowledge base entry to process, as submitted by clients.
///
/// Serialized in camelCase, with the kind under `type`:
///
/// ```json
/// {"id": "kb-1", "type": "TXT", "content": "", "filePath": "/uploads/faq.txt", "botId": "bot-7"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeItem {
    /// Identifier of the item.
    pub id: String,
    /// Source kind tag, matched case-insensitively (`"URL"`, `"text"`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Inline text, or the URL for web items without `source_url`.
    #[serde(default)]
    pub content: String,
    /// URL of a web item.
    #[serde(default)]
    pub source_url: Option<String>,
    /// Reference to an uploaded file.
    #[serde(default)]
    pub file_path: Option<String>,
    /// The bot this knowledge belongs to.
    pub bot_id: String,
}

impl KnowledgeItem {
    /// An item carrying its text inline.
    pub fn text(
        id: impl Into<String>,
        bot_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: SourceKind::Text.to_string(),
            content: content.into(),
            source_url: None,
            file_path: None,
            bot_id: bot_id.into(),
        }
    }

    /// An item pointing at a web page.
    pub fn url(id: impl Into<String>, bot_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source_url: Some(url.into()),
            kind: SourceKind::Url.to_string(),
            ..Self::text(id, bot_id, "")
        }
    }

    /// An item pointing at an uploaded file.
    pub fn file(
        id: impl Into<String>,
        bot_id: impl Into<String>,
        kind: SourceKind,
        path: impl Into<String>,
    ) -> Self {
        Self {
            file_path: Some(path.into()),
            kind: kind.to_string(),
            ..Self::text(id, bot_id, "")
        }
    }

    /// Describe where this item's text lives.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::UnsupportedType`] for unknown kind tags.
    pub fn source(&self) -> Result<Source<'_>, ProcessError> {
        let kind: SourceKind = self.kind.parse().map_err(ProcessError::UnsupportedType)?;
        Ok(Source::new(kind, &self.content)
            .with_url(self.source_url.as_deref())
            .with_file(self.file_path.as_deref()))
    }
}

/// The outcome of processing one knowledge item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    /// Whether extraction and chunking succeeded.
    pub success: bool,
    /// Placeholder for the stored embedding reference.
    #[serde(default)]
    pub vector_data: Option<String>,
    /// The chunks, in document order. Empty on failure.
    #[serde(default)]
    pub chunks: Vec<Swath>,
    /// Wall-clock seconds spent on the item.
    #[serde(default)]
    pub processing_time: f64,
    /// Failure message.
    #[serde(default)]
    pub error: Option<String>,
}

impl ProcessingResult {
    fn succeeded(item_id: &str, chunks: Vec<Swath>, processing_time: f64) -> Self {
        Self {
            success: true,
            vector_data: Some(format!("simulated_vector_data_{item_id}")),
            chunks,
            processing_time,
            error: None,
        }
    }

    fn failed(error: &ProcessError, processing_time: f64) -> Self {
        Self {
            success: false,
            vector_data: None,
            chunks: Vec::new(),
            processing_time,
            error: Some(error.to_string()),
        }
    }
}

/// Why a knowledge item could not be processed.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The item's kind tag is not a known source kind.
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),

    /// The normalizer failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Extraction produced only whitespace.
    #[error("no text content could be extracted")]
    NoContent,
}

/// Extracts, validates and chunks knowledge items.
///
/// Safe to share across threads; each call to [`process`](Self::process) is
/// independent.
pub struct KnowledgeProcessor {
    chunker: Box<dyn Chunker>,
    normalizers: Normalizers,
}

impl KnowledgeProcessor {
    /// Build a processor from its parts.
    pub fn new(chunker: impl Chunker + 'static, normalizers: Normalizers) -> Self {
        Self {
            chunker: Box::new(chunker),
            normalizers,
        }
    }

    /// Build a processor with the built-in normalizers.
    #[must_use]
    pub fn from_config(config: &ProcessorConfig) -> Self {
        let normalizers = Normalizers::with_upload_dir(&config.upload_dir);
        let chunker = WindowChunker::from_config(config.chunking);
        match config.boundary {
            BoundaryKind::PeriodNewline => Self::new(chunker, normalizers),
            BoundaryKind::Sentence => Self::new(chunker.with_boundary(SentenceBreak), normalizers),
        }
    }

    /// The normalizers, for registering extra adapters.
    pub fn normalizers_mut(&mut self) -> &mut Normalizers {
        &mut self.normalizers
    }

    /// Extract and chunk an item, reporting failures as errors.
    ///
    /// # Errors
    ///
    /// See [`ProcessError`].
    pub fn try_process(&self, item: &KnowledgeItem) -> Result<Vec<Swath>, ProcessError> {
        let source = item.source()?;
        let text = self.normalizers.extract(&source)?;
        if text.trim().is_empty() {
            return Err(ProcessError::NoContent);
        }
        Ok(self.chunker.chunk(&text))
    }

    /// Process an item into a result, timing the work.
    pub fn process(&self, item: &KnowledgeItem) -> ProcessingResult {
        let started = Instant::now();
        tracing::info!(
            item = %item.id,
            kind = %item.kind,
            bot = %item.bot_id,
            "processing knowledge item"
        );

        let outcome = self.try_process(item);
        let elapsed = started.elapsed().as_secs_f64();

        match outcome {
            Ok(chunks) => {
                tracing::info!(
                    item = %item.id,
                    chunks = chunks.len(),
                    elapsed_secs = elapsed,
                    "processed knowledge item"
                );
                ProcessingResult::succeeded(&item.id, chunks, elapsed)
            }
            Err(error) => {
                tracing::warn!(
                    item = %item.id,
                    %error,
                    elapsed_secs = elapsed,
                    "failed to process knowledge item"
                );
                ProcessingResult::failed(&error, elapsed)
            }
        }
    }
}

impl Default for KnowledgeProcessor {
    fn default() -> Self {
        Self::from_config(&ProcessorConfig::default())
    }
}

impl std::fmt::Debug for KnowledgeProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeProcessor")
            .field("normalizers", &self.normalizers)
            .finish_non_exhaustive()
    }
}
