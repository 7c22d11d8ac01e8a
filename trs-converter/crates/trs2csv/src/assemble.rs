//! Trace assembly: frequency axis × indexed `ampy`/`ampz` records.

use std::fmt;

use trs_core::{State, Trace, TraceRow};

use crate::axis::FrequencyAxis;
use crate::lookup::{self, TraceError};

/// Real component of a trace record.
pub const REAL_FIELD: &str = "ampy";
/// Imaginary component of a trace record.
pub const IMAG_FIELD: &str = "ampz";

/// Where the sweep bounds and the records of one trace live.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSpec {
    /// Section holding the sweep bounds.
    pub global_section: String,
    /// Section holding `size` and the records `1..=size`.
    pub trace_section: String,
    pub start_field: String,
    pub stop_field: String,
}

impl Default for TraceSpec {
    fn default() -> Self {
        Self {
            global_section: "VNAGloble".to_string(),
            trace_section: "Trace".to_string(),
            start_field: "m_f64StartFreq".to_string(),
            stop_field: "m_f64StopFreq".to_string(),
        }
    }
}

impl TraceSpec {
    /// Same bounds, records taken from `section`.
    pub fn with_trace_section(&self, section: &str) -> Self {
        Self {
            trace_section: section.to_string(),
            ..self.clone()
        }
    }

    /// Read the frequency axis of this trace from the state.
    pub fn axis(&self, state: &State) -> Result<FrequencyAxis, TraceError> {
        let global = lookup::section(state, &self.global_section)?;
        let start = lookup::get_f64(global, &self.global_section, &self.start_field)?;
        let stop = lookup::get_f64(global, &self.global_section, &self.stop_field)?;
        let trace = lookup::section(state, &self.trace_section)?;
        let size = lookup::get_size(trace, &self.trace_section)?;
        FrequencyAxis::new(start, stop, size).ok_or_else(|| TraceError::EmptyTrace {
            section: self.trace_section.clone(),
        })
    }
}

/// Build the trace described by `spec`.
///
/// Every record `1..=size` must exist and carry numeric `ampy` and
/// `ampz`; nothing is skipped.
pub fn build_trace(state: &State, spec: &TraceSpec) -> Result<Trace, TraceError> {
    let axis = spec.axis(state)?;
    let section = spec.trace_section.as_str();
    let records = lookup::section(state, section)?;

    let rows = (0..axis.size)
        .map(|i| {
            let index = i + 1;
            let rec = lookup::record(records, section, index)?;
            let re = lookup::record_f64(rec, section, index, REAL_FIELD)?;
            let im = lookup::record_f64(rec, section, index, IMAG_FIELD)?;
            Ok(TraceRow::new(axis.frequency(i), re, im))
        })
        .collect::<Result<Vec<_>, TraceError>>()?;

    log::debug!(
        "[{}] {} rows, {} .. {} Hz, step {}",
        section,
        rows.len(),
        axis.start,
        axis.stop,
        axis.step
    );

    Ok(Trace {
        section: section.to_string(),
        step: axis.step,
        rows,
    })
}

/// Sample count of a trace section, `None` when the section is absent.
pub fn trace_size(state: &State, section: &str) -> Result<Option<usize>, TraceError> {
    match state.node(section) {
        Some(node) => lookup::get_size(node, section).map(Some),
        None => Ok(None),
    }
}

/// Why an optional trace produced no table.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The file has no such section.
    Absent { section: String },
    /// The section reports `size=0`.
    Empty { section: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Absent { section } => write!(f, "no [{}] section", section),
            SkipReason::Empty { section } => write!(f, "[{}] holds no data (size=0)", section),
        }
    }
}

/// Outcome of assembling the memory trace.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryTrace {
    Present(Trace),
    Skipped(SkipReason),
}

impl MemoryTrace {
    pub fn trace(&self) -> Option<&Trace> {
        match self {
            MemoryTrace::Present(t) => Some(t),
            MemoryTrace::Skipped(_) => None,
        }
    }
}

/// Build the memory trace stored in `section`.
///
/// An absent section or `size=0` means the instrument saved no memory
/// trace; that is reported as [`MemoryTrace::Skipped`], not as an error.
pub fn build_memory_trace(
    state: &State,
    spec: &TraceSpec,
    section: &str,
) -> Result<MemoryTrace, TraceError> {
    let skipped = match trace_size(state, section)? {
        None => SkipReason::Absent {
            section: section.to_string(),
        },
        Some(0) => SkipReason::Empty {
            section: section.to_string(),
        },
        Some(_) => {
            let trace = build_trace(state, &spec.with_trace_section(section))?;
            return Ok(MemoryTrace::Present(trace));
        }
    };
    log::info!("memory trace skipped: {}", skipped);
    Ok(MemoryTrace::Skipped(skipped))
}
