//! Basic Text Chunking
//!
//! The minimal example: chunk text for embedding.
//!
//! ```bash
//! cargo run --example 01_basic_chunking
//! ```

use swaths::{Chunker, WindowChunker};

fn main() -> swaths::Result<()> {
    let document = "Machine learning models learn patterns from data. \
        They generalize these patterns to make predictions. \
        This is fundamentally different from traditional programming.\n\
        Deep learning extends this with multiple hidden layers. \
        Each layer learns increasingly abstract representations.";

    // 120-byte windows re-reading 30 bytes of the previous one
    let chunker = WindowChunker::new(120, 30)?;
    let chunks = chunker.chunk(document);

    println!("Document: {} bytes", document.len());
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        println!(
            "[{}] {}..{} ({} bytes): \"{}\"",
            chunk.chunk_id, chunk.start, chunk.end, chunk.length, chunk.text
        );
    }

    // Windows end on a period or newline whenever that keeps
    // more than half of the window.
    Ok(())
}
