use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;

/// Render an extracted content stream (JSON) into a paginated PDF.
#[derive(Parser)]
#[command(name = "pageflow", version, about)]
struct Args {
    /// Input JSON document: a config record plus the segment sequence
    input: PathBuf,

    /// Output PDF path
    #[arg(short, long, default_value = "document.pdf")]
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let raw = match std::fs::read(&args.input) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("error: cannot read {}: {e}", args.input.display());
            std::process::exit(1);
        }
    };
    let job: pageflow::model::JobInput = match serde_json::from_slice(&raw) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("error: invalid input: {e}");
            std::process::exit(1);
        }
    };

    let show_progress = std::io::stderr().is_terminal();
    let mut report = |pct: u8| {
        if show_progress {
            eprint!("\rrendering... {pct:3}%");
            let _ = std::io::stderr().flush();
        }
    };

    let result = pageflow::render_to_pdf_with(
        &job.segments,
        &job.config,
        &mut pageflow::NoRaster,
        Some(&mut report),
    );
    if show_progress {
        eprintln!();
    }

    let bytes = match result {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(&args.output, &bytes) {
        eprintln!("error: cannot write {}: {e}", args.output.display());
        std::process::exit(1);
    }
    println!("{} ({} bytes)", args.output.display(), bytes.len());
}
