//! Core `.trs` types: the nested state tree, auto-cast, the key-path
//! parser and the document builder.
//!
//! A `.trs` file is a line-oriented dump of a RIGOL vector network
//! analyser's settings and traces. Section headers (`[Trace]`) group
//! `key=value` lines whose keys encode nested field paths with
//! URL-escaped delimiters (`m_arr%5B0%5D.m_f64Freq`).

pub mod autocast;
pub mod document;
pub mod error;
pub mod keypath;
pub mod trace;
pub mod value;

pub use autocast::*;
pub use document::*;
pub use error::*;
pub use keypath::*;
pub use trace::*;
pub use value::*;

pub use num_complex::Complex64;
