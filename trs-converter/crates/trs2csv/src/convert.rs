//! Top-level `.trs` conversion.
//!
//! Parses a `.trs` file, assembles the main trace and the optional memory
//! trace, and stages the selected JSON/CSV outputs for an all-or-nothing
//! commit.

use std::path::{Path, PathBuf};
use thiserror::Error;
use trs_core::{parse_trs, ParseError, State, Trace};
use trs_io::{state_to_json, trace_to_csv, ReadError, StagedOutputs, WriteError};

use crate::assemble::{build_memory_trace, build_trace, MemoryTrace, TraceSpec};
use crate::lookup::TraceError;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Options for `.trs` conversion.
#[derive(Debug, Clone)]
pub struct TrsOptions {
    /// Sections and fields of the main trace.
    pub spec: TraceSpec,
    /// Section holding the memory trace.
    pub memory_section: String,
    /// Assemble the main trace.
    pub trace: bool,
    /// Assemble the memory trace.
    pub memory: bool,
}

impl Default for TrsOptions {
    fn default() -> Self {
        Self {
            spec: TraceSpec::default(),
            memory_section: "MemTrace".to_string(),
            trace: true,
            memory: true,
        }
    }
}

/// Result of a conversion: the parsed state plus the assembled traces.
#[derive(Debug)]
pub struct TrsResult {
    pub state: State,
    /// Main trace, `None` when not requested.
    pub trace: Option<Trace>,
    /// Memory trace outcome, `None` when not requested.
    pub memory: Option<MemoryTrace>,
}

/// Assemble the requested traces from an already parsed state.
pub fn convert_state(state: State, opts: &TrsOptions) -> Result<TrsResult, ConvertError> {
    let trace = if opts.trace {
        Some(build_trace(&state, &opts.spec)?)
    } else {
        None
    };
    let memory = if opts.memory {
        Some(build_memory_trace(&state, &opts.spec, &opts.memory_section)?)
    } else {
        None
    };
    Ok(TrsResult {
        state,
        trace,
        memory,
    })
}

/// Convert `.trs` text.
pub fn trs_to_traces(content: &str, opts: &TrsOptions) -> Result<TrsResult, ConvertError> {
    let state = parse_trs(content)?;
    convert_state(state, opts)
}

/// Read and convert a `.trs` file.
pub fn convert_trs_file(path: &Path, opts: &TrsOptions) -> Result<TrsResult, ConvertError> {
    let state = trs_io::read_trs_file(path)?;
    convert_state(state, opts)
}

/// Destinations of a conversion's outputs; `None` skips that output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputPaths {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub memory_csv: Option<PathBuf>,
}

impl OutputPaths {
    /// `<stem>.json`, `<stem>.csv` and `<stem>_memory.csv` in `out_dir`,
    /// or next to `input` when no directory is given.
    pub fn for_input(input: &Path, out_dir: Option<&Path>) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = match out_dir {
            Some(d) => d.to_path_buf(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        Self {
            json: Some(dir.join(format!("{}.json", stem))),
            csv: Some(dir.join(format!("{}.csv", stem))),
            memory_csv: Some(dir.join(format!("{}_memory.csv", stem))),
        }
    }
}

/// Serialise the selected outputs of `result` into a staged set.
///
/// A skipped memory trace contributes no file even if a path is set.
pub fn stage_outputs(result: &TrsResult, paths: &OutputPaths) -> Result<StagedOutputs, ConvertError> {
    let mut staged = StagedOutputs::new();
    if let Some(path) = &paths.json {
        staged.add(path, state_to_json(&result.state)?);
    }
    if let (Some(path), Some(trace)) = (&paths.csv, &result.trace) {
        staged.add(path, trace_to_csv(trace)?);
    }
    if let (Some(path), Some(trace)) = (
        &paths.memory_csv,
        result.memory.as_ref().and_then(MemoryTrace::trace),
    ) {
        staged.add(path, trace_to_csv(trace)?);
    }
    Ok(staged)
}
