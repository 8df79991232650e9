use clap::Parser;
use std::fs;
use std::path::PathBuf;

use fractree::{
    io_utils::{extension_error, fractree_cli_error, io_cli_error, simple_cli_error},
    PatternRegistry, Session,
};

/// Expand a .frx envelope back into its JSON tree.
#[derive(Parser)]
struct Args {
    /// Input .frx file
    input: PathBuf,
    /// Output JSON file path
    output: PathBuf,
    /// Pattern registry written by the compressor; without it, pattern
    /// references expand only to their stored samples
    #[arg(long)]
    patterns: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args
        .input
        .extension()
        .and_then(|s| s.to_str())
        .map_or(true, |ext| ext.to_ascii_lowercase() != "frx")
    {
        return Err(extension_error(&args.input).into());
    }

    let data =
        fs::read_to_string(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    let blob: serde_json::Value = serde_json::from_str(&data)
        .map_err(|e| simple_cli_error(&format!("input is not valid JSON: {e}")))?;

    let mut session = Session::new();
    if let Some(path) = &args.patterns {
        *session.patterns_mut() = PatternRegistry::load(path)
            .map_err(|e| fractree_cli_error("loading pattern registry", e))?;
    }

    let tree = session
        .decompress(&blob)
        .map_err(|e| fractree_cli_error("decompression failed", e))?;
    fs::write(&args.output, serde_json::to_string_pretty(&tree)?.as_bytes())
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;
    Ok(())
}
