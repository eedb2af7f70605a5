//! Processing Knowledge Items
//!
//! Reads knowledge items as JSON and prints processing results.
//!
//! ```bash
//! RUST_LOG=swaths=debug cargo run --example process_knowledge -- swaths.toml
//! ```
//!
//! With no argument the default configuration is used.

use swaths::{KnowledgeItem, KnowledgeProcessor, ProcessorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ProcessorConfig::load(path)?,
        None => ProcessorConfig::default(),
    };
    let processor = KnowledgeProcessor::from_config(&config);

    let items: Vec<KnowledgeItem> = serde_json::from_str(
        r#"[
            {"id": "kb-1", "type": "TEXT", "botId": "bot-1",
             "content": "Our store opens at 9am.\nReturns are accepted within 30 days. Gift cards never expire."},
            {"id": "kb-2", "type": "TEXT", "botId": "bot-1", "content": "   "},
            {"id": "kb-3", "type": "URL", "botId": "bot-1", "content": "https://example.com/faq"},
            {"id": "kb-4", "type": "TXT", "botId": "bot-1", "filePath": "/uploads/missing.txt"}
        ]"#,
    )?;

    for item in &items {
        let result = processor.process(item);
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
