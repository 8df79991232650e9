use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use fractree::{
    io_utils::{io_cli_error, simple_cli_error},
    Session,
};

/// Compress a JSON tree into a self-describing .frx envelope.
#[derive(Parser)]
struct Args {
    /// Input JSON file
    input: PathBuf,
    /// Output .frx file path
    output: PathBuf,
    /// Root name used for anchor paths
    #[arg(long, default_value = "root")]
    name: String,
    /// Write the pattern registry here so a separate process can expand
    /// pattern references exactly
    #[arg(long)]
    patterns: Option<PathBuf>,
    /// Print a machine readable summary to stdout
    #[arg(long)]
    json: bool,
    /// Compress but skip writing the output file
    #[arg(long)]
    dry_run: bool,
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

    let data =
        fs::read_to_string(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    let tree: serde_json::Value = serde_json::from_str(&data)
        .map_err(|e| simple_cli_error(&format!("input is not valid JSON: {e}")))?;

    let start = Instant::now();
    let mut session = Session::new();
    let (envelope, stats) = session.compress_with_stats(&tree, &args.name);
    let elapsed = start.elapsed();

    let blob = serde_json::to_string_pretty(&envelope.to_value())?;
    if args.dry_run {
        eprintln!("(dry run) skipping file write");
    } else {
        fs::write(&args.output, blob.as_bytes())
            .map_err(|e| io_cli_error("writing output file", &args.output, e))?;
    }

    if let Some(path) = &args.patterns {
        session
            .patterns()
            .save(path)
            .map_err(|e| simple_cli_error(&format!("saving pattern registry: {e}")))?;
    }

    stats.report();
    if args.json {
        let summary = serde_json::json!({
            "original_chars": stats.original_size,
            "compressed_chars": stats.compressed_size,
            "pattern_refs": stats.pattern_reuse,
            "anchor_refs": stats.anchor_references,
            "elapsed_ms": elapsed.as_millis(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
