#![allow(dead_code)]

mod log;
mod pipeline;

use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process;

use crate::log::conversion_log::ConversionLog;
use crate::pipeline::batch::{run_batch, BatchOptions};
use crate::pipeline::conversion::{ensure_out_dir, ConversionSettings};
use trs2csv::{TraceSpec, TrsOptions};

/// Convert RIGOL VNA .trs files to a JSON configuration document and
/// CSV trace tables.
#[derive(Parser)]
#[command(name = "vna-trace", version, about, long_about = None)]
struct Cli {
    /// .trs files to convert
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Do not write the JSON configuration document
    #[arg(long)]
    no_json: bool,

    /// Do not write the trace CSV
    #[arg(long)]
    no_csv: bool,

    /// Do not write the memory trace CSV
    #[arg(long)]
    no_memory: bool,

    /// Section holding the sweep bounds
    #[arg(long, default_value = "VNAGloble")]
    global_section: String,

    /// Section holding the main trace records
    #[arg(long, default_value = "Trace")]
    trace_section: String,

    /// Section holding the memory trace records
    #[arg(long, default_value = "MemTrace")]
    memory_section: String,

    /// Abort the batch at the first failing file
    #[arg(long)]
    fail_fast: bool,

    /// Worker threads
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Save the conversion log (.json for JSON, text otherwise)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_json && cli.no_csv && cli.no_memory {
        Cli::command()
            .error(
                clap::error::ErrorKind::ArgumentConflict,
                "--no-json, --no-csv and --no-memory leave nothing to write",
            )
            .exit();
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }),
    )
    .format_timestamp_secs()
    .init();

    ::log::info!("vna-trace v{}", env!("CARGO_PKG_VERSION"));

    let opts = BatchOptions {
        settings: ConversionSettings {
            trs: TrsOptions {
                spec: TraceSpec {
                    global_section: cli.global_section,
                    trace_section: cli.trace_section,
                    ..TraceSpec::default()
                },
                memory_section: cli.memory_section,
                ..TrsOptions::default()
            },
            json: !cli.no_json,
            csv: !cli.no_csv,
            memory: !cli.no_memory,
            out_dir: cli.out_dir,
        },
        jobs: cli.jobs.max(1),
        fail_fast: cli.fail_fast,
    };

    if let Some(dir) = &opts.settings.out_dir {
        if let Err(e) = ensure_out_dir(dir) {
            ::log::error!("{}", e);
            process::exit(1);
        }
    }

    let mut conv_log = ConversionLog::new();
    let summary = run_batch(&cli.files, &opts, &mut conv_log);

    if let Some(path) = &cli.log {
        match conv_log.save(path) {
            Ok(()) => ::log::info!("Conversion log saved to {}", path.display()),
            Err(e) => ::log::error!("cannot save conversion log {}: {}", path.display(), e),
        }
    }

    ::log::info!("Done: {}", summary);
    process::exit(if summary.success() { 0 } else { 1 });
}
