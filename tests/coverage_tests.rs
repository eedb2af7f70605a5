#![allow(clippy::needless_range_loop)]
//! Coverage, overlap and worked-example tests for window chunking.

use swaths::{chunk, Chunker, Error, Swath, WindowChunker};

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn sentence_example_snaps_first_window() {
    let text = "Sentence one. Sentence two. Sentence three.";
    let swaths = chunk(text, 20, 5).unwrap();

    assert_eq!(swaths[0].text, "Sentence one.");
    assert_eq!(swaths[0].start, 0);
    assert_eq!(swaths[0].end, 13);
    assert_eq!(swaths[0].length, 13);
    // Next cursor is 13 - 5.
    assert_eq!(swaths[1].start, 8);
}

#[test]
fn sentence_example_full_sequence() {
    let text = "Sentence one. Sentence two. Sentence three.";
    let swaths = chunk(text, 20, 5).unwrap();

    let spans: Vec<_> = swaths.iter().map(Swath::span).collect();
    assert_eq!(spans, vec![0..13, 8..27, 22..42, 37..43]);

    let texts: Vec<_> = swaths.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Sentence one.", "one. Sentence two.", "two. Sentence three", "three."]
    );
}

#[test]
fn empty_input_produces_empty_output() {
    assert!(chunk("", 1000, 200).unwrap().is_empty());
    assert!(chunk(" \n\t ", 1000, 200).unwrap().is_empty());
}

#[test]
fn short_text_is_one_chunk() {
    let text = "A short paragraph. With two sentences.\n";
    let swaths = chunk(text, 1000, 200).unwrap();

    assert_eq!(swaths.len(), 1);
    assert_eq!(swaths[0].start, 0);
    assert_eq!(swaths[0].end, text.len());
    assert_eq!(swaths[0].text, text.trim());
}

#[test]
fn unbroken_text_advances_by_step() {
    let text = "x".repeat(2500);
    let swaths = chunk(&text, 1000, 200).unwrap();

    let starts: Vec<_> = swaths.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0, 800, 1600]);
    for pair in swaths.windows(2) {
        assert_eq!(pair[0].end - pair[1].start, 200);
    }
    assert_eq!(swaths.last().map(|s| s.end), Some(2500));
}

#[test]
fn degenerate_configuration_is_rejected() {
    assert!(matches!(chunk("text", 0, 0), Err(Error::InvalidChunkSize(0))));
    assert!(matches!(
        chunk("text", 10, 10),
        Err(Error::OverlapExceedsSize { size: 10, overlap: 10 })
    ));
    assert!(matches!(
        chunk("text", 10, 25),
        Err(Error::OverlapExceedsSize { .. })
    ));
}

// =============================================================================
// Coverage: windows should cover the entire input
// =============================================================================

/// Check that the union of windows is the whole text.
fn windows_cover(swaths: &[Swath], text: &str) -> bool {
    let mut covered = vec![false; text.len()];
    for swath in swaths {
        for i in swath.start..swath.end {
            covered[i] = true;
        }
    }
    covered.iter().all(|&c| c)
}

#[test]
fn window_chunker_full_coverage() {
    let texts = [
        "Hello, world!",
        "The quick brown fox jumps over the lazy dog.",
        &"A".repeat(1000),
        "Short",
        "Multiple\n\nParagraphs\n\nHere",
        "Dr. Smith went to Washington D.C. He met Mr. Jones.\nThen he left.",
    ];

    for text in &texts {
        let chunker = WindowChunker::new(50, 10).unwrap();
        let swaths = chunker.chunk(text);

        assert!(
            windows_cover(&swaths, text),
            "coverage failed for: {:?}",
            &text[..text.len().min(50)]
        );
    }
}

#[test]
fn unicode_handling() {
    let text = "Hello 世界! Привет мир! مرحبا بالعالم. Ещё одно предложение.";

    let swaths = chunk(text, 20, 5).unwrap();
    for swath in &swaths {
        // Slicing must not panic and must agree with the stored text.
        assert_eq!(text[swath.span()].trim(), swath.text);
    }
    assert!(windows_cover(&swaths, text));
}

#[test]
fn window_grows_to_hold_one_wide_char() {
    // "€" is 3 bytes; a 2-byte window cannot hold it, so it takes the whole char.
    let text = "€€";
    let swaths = chunk(text, 2, 0).unwrap();

    let spans: Vec<_> = swaths.iter().map(Swath::span).collect();
    assert_eq!(spans, vec![0..3, 3..6]);
    assert!(swaths.iter().all(|s| s.end - s.start == 3));
}

#[test]
fn whitespace_gaps_produce_no_empty_swaths() {
    let text = format!("head.{}tail.", " ".repeat(40));
    let swaths = chunk(&text, 10, 2).unwrap();

    assert!(swaths.iter().all(|s| !s.text.is_empty()));
    let texts: Vec<_> = swaths.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts.first(), Some(&"head."));
    assert_eq!(texts.last(), Some(&"tail."));
    assert_eq!(swaths.last().map(|s| s.end), Some(text.len()));
}

// =============================================================================
// Overlap
// =============================================================================

#[test]
fn overlap_is_exact_without_snapping() {
    let text = "abcdefghijklmnopqrstuvwxyz".repeat(4);

    for overlap in [0, 5, 10, 29] {
        let swaths = chunk(&text, 30, overlap).unwrap();
        for pair in swaths.windows(2) {
            assert_eq!(pair[0].end - pair[1].start, overlap);
        }
    }
}

#[test]
fn snapped_windows_overlap_from_snapped_end() {
    let text = "First sentence is here.\nSecond sentence follows it.\nThird one ends.";
    let swaths = chunk(text, 40, 8).unwrap();

    assert_eq!(swaths[0].text, "First sentence is here.");
    assert_eq!(swaths[0].end, 24);
    assert_eq!(swaths[1].start, 16);
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn identical_windows_share_ids() {
    let text = "repeat me. ".repeat(3);
    let a = chunk(&text, 1000, 200).unwrap();
    let b = chunk(&text, 1000, 200).unwrap();
    assert_eq!(a[0].chunk_id, b[0].chunk_id);
}

#[test]
fn distinct_windows_get_distinct_ids() {
    let text = "abcdefghijklmnopqrstuvwxyz0123456789".repeat(10);
    let swaths = chunk(&text, 40, 7).unwrap();

    let mut ids: Vec<_> = swaths.iter().map(|s| s.chunk_id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), swaths.len());
}

// =============================================================================
// Custom chunkers
// =============================================================================

/// A chunker defined outside the crate that keeps the default estimate.
struct WholeText;

impl Chunker for WholeText {
    fn chunk(&self, text: &str) -> Vec<Swath> {
        chunk(text, text.len().max(1), 0).unwrap_or_default()
    }
}

#[test]
fn external_chunker_uses_default_estimate() {
    let chunker = WholeText;

    assert_eq!(chunker.estimate_chunks(0), 1);
    assert_eq!(chunker.estimate_chunks(10), 1);
    assert_eq!(chunker.estimate_chunks(1200), 2);
    assert_eq!(chunker.chunk("one piece").len(), 1);
}

#[test]
fn window_chunker_overrides_estimate() {
    // step = 800, so 2500 bytes need ceil(2500 / 800) = 4 steps at most.
    let chunker = WindowChunker::default();
    assert_eq!(chunker.estimate_chunks(2500), 4);
    assert!(chunker.estimate_chunks(2500) >= chunker.chunk(&"x".repeat(2500)).len());
}
