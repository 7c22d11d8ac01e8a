//! All-or-nothing output commits.
//!
//! Every output of one conversion is serialised in memory first, then
//! written next to its destination as `<name>.tmp` and renamed into place
//! only once every temporary has been written. Any failure removes what
//! was already produced for that conversion.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::writer::WriteError;

/// Outputs of one conversion waiting to be committed.
#[derive(Debug, Default)]
pub struct StagedOutputs {
    files: Vec<(PathBuf, Vec<u8>)>,
}

impl StagedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<PathBuf>, contents: Vec<u8>) {
        self.files.push((path.into(), contents));
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every staged file, or none of them.
    pub fn commit(self) -> Result<Vec<PathBuf>, WriteError> {
        let mut temps: Vec<(PathBuf, &Path)> = Vec::with_capacity(self.files.len());
        for (path, contents) in &self.files {
            let tmp = temp_path(path);
            if let Err(source) = fs::write(&tmp, contents) {
                remove_all(temps.iter().map(|(t, _)| t.as_path()).chain([tmp.as_path()]));
                return Err(WriteError::Output {
                    path: path.clone(),
                    source,
                });
            }
            temps.push((tmp, path.as_path()));
        }

        let mut committed = Vec::with_capacity(temps.len());
        for (i, (tmp, path)) in temps.iter().enumerate() {
            if let Err(source) = fs::rename(tmp, path) {
                remove_all(committed.iter().map(PathBuf::as_path));
                remove_all(temps[i..].iter().map(|(t, _)| t.as_path()));
                return Err(WriteError::Output {
                    path: path.to_path_buf(),
                    source,
                });
            }
            log::debug!("wrote {}", path.display());
            committed.push(path.to_path_buf());
        }
        Ok(committed)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn remove_all<'a>(paths: impl Iterator<Item = &'a Path>) {
    for p in paths {
        if let Err(e) = fs::remove_file(p) {
            log::debug!("cleanup of {} failed: {}", p.display(), e);
        }
    }
}
