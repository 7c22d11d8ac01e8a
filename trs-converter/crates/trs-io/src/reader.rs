//! `.trs` file reader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use trs_core::{parse_trs, ParseError, State};

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Read a `.trs` file as text.
///
/// Instrument exports are expected to be UTF-8; invalid sequences are
/// replaced rather than rejected since they only occur inside values.
pub fn read_trs_text(path: &Path) -> Result<String, ReadError> {
    let bytes = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            log::warn!("{}: not valid UTF-8, decoding lossily", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Read and parse a `.trs` file into its state tree.
pub fn read_trs_file(path: &Path) -> Result<State, ReadError> {
    let text = read_trs_text(path)?;
    parse_trs(&text).map_err(|source| ReadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use trs_core::Scalar;

    #[test]
    fn test_read_and_parse() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "[S]\nx=1\n").unwrap();
        let st = read_trs_file(f.path()).unwrap();
        assert_eq!(st.node("S").unwrap().scalar("x"), Some(&Scalar::Int(1)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_trs_file(&dir.path().join("absent.trs")).unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
        assert!(err.to_string().contains("absent.trs"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "x=1\n").unwrap();
        let err = read_trs_file(f.path()).unwrap_err();
        match err {
            ReadError::Parse { source, .. } => assert_eq!(source.line(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"[S]\nname=\xffab\n").unwrap();
        let st = read_trs_file(f.path()).unwrap();
        assert_eq!(
            st.node("S").unwrap().scalar("name"),
            Some(&Scalar::Str("\u{fffd}ab".into()))
        );
    }
}
