// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// doccam — photograph a document, get back a flat scan.
//
// Entry point. Initialises logging, loads settings, runs the scan pipeline on
// one photo and writes the rectified page.

mod debug_dump;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use doccam_core::human_errors::humanize_error;
use doccam_core::{DoccamError, ScanConfig};
use doccam_document::image::save_rgb;
use doccam_document::integrity::raster_digest;
use doccam_document::{DocumentScanner, FileImageSource, PipelineObserver, TracingObserver};
use tracing::info;

use debug_dump::DebugDumpObserver;

/// Find the document in a photo and warp it into a flat, upright page.
#[derive(Parser, Debug)]
#[command(name = "doccam", version, arg_required_else_help = true)]
struct Cli {
    /// Photo of the document (JPEG, PNG, TIFF, ...).
    input: PathBuf,

    /// Where to write the rectified page. Defaults to `<input>-rectified.png`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output width in pixels; the height follows the page's aspect ratio.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// JSON settings file. Missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save intermediate images (edge map, boundary, hull, corners) here.
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Print the detection report as JSON on stdout.
    #[arg(long)]
    report: bool,

    /// Print the SHA-256 digest of the rectified raster.
    #[arg(long)]
    digest: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ScanConfig::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ScanConfig::default(),
    };
    let scanner = DocumentScanner::try_new(config)?;

    let mut dump = cli
        .debug_dir
        .as_ref()
        .map(|dir| {
            DebugDumpObserver::new(dir)
                .with_context(|| format!("creating debug directory {}", dir.display()))
        })
        .transpose()?;
    let mut tracing_observer = TracingObserver;
    let observer: &mut dyn PipelineObserver = match dump.as_mut() {
        Some(dump) => dump,
        None => &mut tracing_observer,
    };

    let source = FileImageSource::new(&cli.input);
    let scanned = scanner.scan_source(&source, cli.width, observer);
    if let Some(dump) = &dump {
        info!(
            dir = %dump.dir().display(),
            files = dump.written().len(),
            "Wrote debug images"
        );
    }
    let document = scanned.with_context(|| format!("scanning {}", cli.input.display()))?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    save_rgb(&document.image, &output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        output = %output.display(),
        width = document.image.width(),
        height = document.image.height(),
        "Saved rectified page"
    );

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&document.detection)?);
    }
    if cli.digest {
        println!("{}  {}", raster_digest(&document.image), output.display());
    }
    Ok(())
}

/// `scans/page.jpg` becomes `scans/page-rectified.png`.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".into());
    input.with_file_name(format!("{stem}-rectified.png"))
}

fn report_error(err: &anyhow::Error) {
    match err.chain().find_map(|e| e.downcast_ref::<DoccamError>()) {
        Some(doccam_err) => {
            let human = humanize_error(doccam_err);
            eprintln!("{}", human.message);
            eprintln!("  {}", human.suggestion);
            eprintln!("  ({err:#})");
        }
        None => eprintln!("error: {err:#}"),
    }
}
