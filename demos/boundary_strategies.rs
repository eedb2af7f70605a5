//! Boundary Strategies Comparison
//!
//! Shows where each boundary strategy snaps window ends.
//!
//! ```bash
//! cargo run --example boundary_strategies
//! ```

use swaths::{Chunker, SentenceBreak, Swath, WindowChunker};

fn print_chunks(chunks: &[Swath]) {
    println!("   Chunks: {}", chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let preview = chunk.text.chars().take(60).collect::<String>();
        println!("   [{}] bytes {}-{}: \"{}...\"", i, chunk.start, chunk.end, preview);
    }
    println!();
}

fn main() -> swaths::Result<()> {
    println!("Boundary Strategies");
    println!("===================\n");

    let document = r"Dr. Geoffrey Hinton pioneered backpropagation in the 1980s. His work at the University of Toronto, along with collaborators like Yann LeCun and Yoshua Bengio, laid the foundation for modern AI. In 2024, they were recognized with the Nobel Prize.

Version 2.5 of the toolkit shipped in March. It improved throughput by 3.7x on the reference benchmark.";

    println!("Document length: {} bytes\n", document.len());

    println!("1. Period or Newline (default)");
    println!("   --------------------------");
    println!("   Snaps to the last '.' or '\\n'. Abbreviations and decimals count.\n");
    let plain = WindowChunker::new(120, 20)?;
    print_chunks(&plain.chunk(document));

    println!("2. Sentence Break (UAX #29)");
    println!("   -----------------------");
    println!("   Snaps to the end of the last complete sentence.\n");
    let sentences = WindowChunker::new(120, 20)?.with_boundary(SentenceBreak);
    print_chunks(&sentences.chunk(document));

    Ok(())
}
