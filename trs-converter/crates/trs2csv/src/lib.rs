//! RIGOL `.trs` → trace tables.
//!
//! Reads the sweep bounds from the global settings section, derives the
//! linear frequency axis and zips it against the 1-based `ampy`/`ampz`
//! records of a trace section.

pub mod assemble;
pub mod axis;
pub mod convert;
pub mod lookup;

pub use assemble::*;
pub use axis::*;
pub use convert::*;
pub use lookup::*;
