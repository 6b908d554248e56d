//! A binary executable that demonstrates how to use the `json-tree` library.
//!
//! It reads the file named by its first argument, tokenizes and parses it,
//! and prints every root node.
//!
//! You can run this example with: `cargo run -- path/to/file.json`
//! Set `RUST_LOG=json_tree=trace` to watch the lexer and parser work.

use anyhow::{bail, Context, Result};
use json_tree::{parse, tokenize_reader};
use std::env;
use std::fs::File;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let path = match env::args().nth(1) {
        Some(path) => path,
        None => bail!("usage: json-tree <file>"),
    };

    let file = File::open(&path).with_context(|| format!("failed to open {path}"))?;
    let tokens = tokenize_reader(file).with_context(|| format!("failed to read {path}"))?;
    println!("Read {} tokens from {}", tokens.len(), path);

    let roots = parse(&tokens).with_context(|| format!("failed to parse {path}"))?;
    for root in &roots {
        println!("{:?}", root);
    }

    Ok(())
}
