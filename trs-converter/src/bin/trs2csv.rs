//! trs2csv: convert a RIGOL VNA `.trs` file to a CSV trace table.

use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use trs2csv::{MemoryTrace, OutputPaths, TraceSpec, TrsOptions};

#[derive(Parser)]
#[command(
    name = "trs2csv",
    version,
    about = "Convert a RIGOL VNA .trs file to a CSV trace table"
)]
struct Cli {
    /// Input .trs file
    #[arg(short, long)]
    r#in: String,

    /// Output CSV file (or - for stdout)
    #[arg(short, long, default_value = "-")]
    out: String,

    /// Also write the full configuration as JSON to this file
    #[arg(long)]
    json: Option<String>,

    /// Write the memory trace CSV to this file (when the file holds one)
    #[arg(long)]
    memory: Option<String>,

    /// Section holding the sweep bounds
    #[arg(long, default_value = "VNAGloble")]
    global_section: String,

    /// Section holding the main trace records
    #[arg(long, default_value = "Trace")]
    trace_section: String,

    /// Section holding the memory trace records
    #[arg(long, default_value = "MemTrace")]
    memory_section: String,

    /// Verbose mode
    #[arg(short, long, default_value_t = false)]
    verb: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verb { "debug" } else { "warn" }),
    )
    .format_timestamp_secs()
    .init();

    let opts = TrsOptions {
        spec: TraceSpec {
            global_section: cli.global_section,
            trace_section: cli.trace_section,
            ..TraceSpec::default()
        },
        memory_section: cli.memory_section,
        trace: true,
        memory: cli.memory.is_some(),
    };

    let result = trs2csv::convert_trs_file(Path::new(&cli.r#in), &opts)?;

    if cli.verb {
        eprintln!("TRS conversion complete.");
        eprintln!("  Sections: {}", result.state.len());
        if let Some(trace) = &result.trace {
            eprintln!("  Trace [{}]: {} points, step {} Hz", trace.section, trace.len(), trace.step);
        }
        match &result.memory {
            Some(MemoryTrace::Present(trace)) => {
                eprintln!("  Memory [{}]: {} points", trace.section, trace.len())
            }
            Some(MemoryTrace::Skipped(reason)) => eprintln!("  Memory: skipped, {}", reason),
            None => {}
        }
    }

    let to_stdout = cli.out == "-";
    let paths = OutputPaths {
        json: cli.json.map(PathBuf::from),
        csv: (!to_stdout).then(|| PathBuf::from(&cli.out)),
        memory_csv: cli.memory.map(PathBuf::from),
    };
    trs2csv::stage_outputs(&result, &paths)?.commit()?;

    if to_stdout {
        if let Some(trace) = &result.trace {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            trs_io::write_trace_csv(&mut out, trace)?;
            out.flush()?;
        }
    }

    Ok(())
}
