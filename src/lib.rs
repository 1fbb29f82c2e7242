pub mod cli;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use anyhow::Context;
use clap::Parser;
use std::io::Write;

/// One whole pass over a header: scan, group by name segment, render.
///
/// Pure text to text, so the same input always yields the same listing.
pub fn generate(header: &str, name_macro: Option<&str>) -> String {
    let extraction = parser::scan(header, name_macro);
    let root = processor::run(extraction.records);
    writer::cpp::emit(&root)
}

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // 1. ── Parse ──────────────────────────────────────────────────────
    let header = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;

    // 2. ── Process ────────────────────────────────────────────────────
    let listing = generate(&header, args.name_macro.as_deref());

    // 3. ── Write output ───────────────────────────────────────────────
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(listing.as_bytes())
        .with_context(|| "Writing listing to stdout")?;

    Ok(())
}
