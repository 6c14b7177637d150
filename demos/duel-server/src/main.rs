//! Standalone word duel server binary.
//!
//! Configuration comes from the environment:
//! - `DUEL_ADDR`  — bind address (default `0.0.0.0:8080`)
//! - `DUEL_WORDS` — path to a newline-separated word list; without it
//!   any well-formed five-letter word is accepted
//! - `RUST_LOG`   — tracing filter (default `info`)

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wordduel::prelude::*;

/// Loads a dictionary from a newline-separated file. Blank lines and
/// entries that aren't well-formed words are skipped.
fn word_list_from_file(path: &Path) -> std::io::Result<WordList> {
    let contents = std::fs::read_to_string(path)?;
    Ok(WordList::new(contents.lines().map(str::trim)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("DUEL_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let mut builder = DuelServer::builder().bind(&addr);
    if let Ok(path) = std::env::var("DUEL_WORDS") {
        let words = word_list_from_file(Path::new(&path))?;
        tracing::info!(path, "loaded word list");
        builder = builder.dictionary(Arc::new(words));
    }

    let server = builder.build().await?;
    tracing::info!(addr, "word duel server started");
    server.run().await?;
    Ok(())
}
