//! The Swath type: a trimmed chunk of text with its window and fingerprint.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the window digest.
const CHUNK_ID_LEN: usize = 8;

/// A chunk of text with the window it was cut from.
///
/// A swath is a band cut across a document. Neighbouring swaths share a
/// strip of text (the overlap) so context at the seams is never lost.
///
/// ## Offsets
///
/// `start` and `end` are byte offsets (UTF-8 code units) into the original
/// text and describe the *window*, not the trimmed text:
///
/// ```rust
/// use swaths::Swath;
///
/// let text = "  Hello, world!  ";
/// let swath = Swath::from_window(text, 0, text.len());
///
/// assert_eq!(swath.text, "Hello, world!");
/// assert_eq!(swath.length, 13);
/// assert_eq!((swath.start, swath.end), (0, 17));
/// ```
///
/// ## Identity
///
/// `chunk_id` is the first 8 hex characters of the SHA-256 digest of the
/// untrimmed window. It is stable for identical windows and good enough for
/// cache keys and de-duplication. It is not an integrity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swath {
    /// The chunk text, leading and trailing whitespace removed.
    pub text: String,
    /// Byte offset where the window starts in the original document.
    pub start: usize,
    /// Byte offset where the window ends (exclusive) in the original document.
    pub end: usize,
    /// Length of `text` in bytes.
    pub length: usize,
    /// Short content fingerprint of the untrimmed window.
    pub chunk_id: String,
}

impl Swath {
    /// Build a swath from the window `source[start..end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start..end` is out of bounds or not on char boundaries,
    /// like any other string slice.
    #[must_use]
    pub fn from_window(source: &str, start: usize, end: usize) -> Self {
        let window = &source[start..end];
        let text = window.trim();
        Self {
            text: text.to_string(),
            start,
            end,
            length: text.len(),
            chunk_id: fingerprint(window),
        }
    }

    /// The length of the trimmed text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the trimmed text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The byte span of the window in the original document.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl std::fmt::Display for Swath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Swath {{ id: {}, span: {}..{}, len: {} }}",
            self.chunk_id,
            self.start,
            self.end,
            self.length
        )
    }
}

/// Short hex fingerprint of a window.
pub(crate) fn fingerprint(window: &str) -> String {
    let digest = Sha256::digest(window.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(CHUNK_ID_LEN);
    id
}
