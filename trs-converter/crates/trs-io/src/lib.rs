//! `.trs` I/O: reading source files, serialising the state as JSON and
//! traces as CSV, and committing a file's outputs all-or-nothing.

pub mod reader;
pub mod staging;
pub mod writer;

pub use reader::*;
pub use staging::*;
pub use writer::*;
