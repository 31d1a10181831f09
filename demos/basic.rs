//! Splits a source, diffs it against an edited destination and prints the
//! change list.
//!
//! Run with:
//!     cargo run --example basic
//!
//! With logging:
//!     RUST_LOG=rhdiff=trace cargo run --example basic --features tracing

use std::io::Cursor;

use rhdiff::{DeltaStats, calculate_delta, split};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let source = b"abcxyzfoo";
    let destination = b"abc12xyzfo";
    let chunk_size = 3;

    let chunks = split(&source[..], chunk_size)?;
    println!(
        "Source: {} bytes in {} chunks of {}",
        source.len(),
        chunks.len(),
        chunk_size
    );
    for chunk in &chunks {
        println!("  {}", chunk);
    }

    let changes = calculate_delta(chunks, &mut Cursor::new(destination), chunk_size)?;

    println!("\nChanges:");
    for change in &changes {
        println!(
            "  {:<32} {:?}",
            change.to_string(),
            String::from_utf8_lossy(change.data())
        );
    }

    println!("\n{}", DeltaStats::from_changes(&changes));

    Ok(())
}
