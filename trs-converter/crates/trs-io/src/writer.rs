//! JSON and CSV serialisation of converted `.trs` data.

use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;
use trs_core::{State, Trace};

/// Header row of every trace table.
pub const CSV_HEADER: &str = "frequency,real,imaginary";

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Shortest representation that reads back as the same `f64`, always
/// with a fractional part or exponent (`1500.0`, `1e-7`).
pub fn format_float(x: f64) -> String {
    format!("{:?}", x)
}

/// Write the whole state as pretty-printed JSON (2-space indent).
pub fn write_state_json<W: Write>(writer: &mut W, state: &State) -> Result<(), WriteError> {
    serde_json::to_writer_pretty(&mut *writer, state)?;
    Ok(())
}

pub fn state_to_json(state: &State) -> Result<Vec<u8>, WriteError> {
    let mut buf = Vec::new();
    write_state_json(&mut buf, state)?;
    Ok(buf)
}

/// Write a trace as `frequency,real,imaginary` rows.
pub fn write_trace_csv<W: Write>(writer: &mut W, trace: &Trace) -> Result<(), WriteError> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for row in &trace.rows {
        writeln!(
            writer,
            "{},{},{}",
            format_float(row.frequency),
            format_float(row.value.re),
            format_float(row.value.im)
        )?;
    }
    Ok(())
}

pub fn trace_to_csv(trace: &Trace) -> Result<Vec<u8>, WriteError> {
    let mut buf = Vec::with_capacity(32 * (trace.len() + 1));
    write_trace_csv(&mut buf, trace)?;
    Ok(buf)
}
