//! Assembled trace types.

use num_complex::Complex64;

/// One sample of a trace: frequency in Hz and the complex measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub frequency: f64,
    pub value: Complex64,
}

impl TraceRow {
    pub fn new(frequency: f64, re: f64, im: f64) -> Self {
        Self {
            frequency,
            value: Complex64::new(re, im),
        }
    }
}

/// An ordered trace taken from one section of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Section the records were read from.
    pub section: String,
    /// Frequency step between consecutive rows (0 for a single sample).
    pub step: f64,
    pub rows: Vec<TraceRow>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|r| r.frequency)
    }
}
