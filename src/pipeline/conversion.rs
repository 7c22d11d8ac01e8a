/// Single-file conversion for the batch pipeline
///
/// Validates the input path, runs the `.trs` converter and commits the
/// selected outputs all-or-nothing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use trs2csv::{ConvertError, MemoryTrace, OutputPaths, TrsOptions};
use trs_io::ReadError;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("{} is not a .trs file", .0.display())]
    Extension(PathBuf),
    #[error("cannot create output directory {}: {source}", path.display())]
    OutDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "{}: output {} is already claimed by {}",
        path.display(),
        output.display(),
        first.display()
    )]
    OutputCollision {
        path: PathBuf,
        output: PathBuf,
        first: PathBuf,
    },
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("{}: {source}", path.display())]
    Convert {
        path: PathBuf,
        #[source]
        source: ConvertError,
    },
}

/// Which outputs to produce and where
#[derive(Debug, Clone)]
pub struct ConversionSettings {
    /// Section names handed to the converter
    pub trs: TrsOptions,
    pub json: bool,
    pub csv: bool,
    pub memory: bool,
    /// Output directory; `None` writes next to each input
    pub out_dir: Option<PathBuf>,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            trs: TrsOptions::default(),
            json: true,
            csv: true,
            memory: true,
            out_dir: None,
        }
    }
}

impl ConversionSettings {
    /// Converter options with trace assembly limited to the selected outputs
    pub fn trs_options(&self) -> TrsOptions {
        TrsOptions {
            trace: self.csv,
            memory: self.memory,
            ..self.trs.clone()
        }
    }

    /// Output destinations for `input`
    pub fn output_paths(&self, input: &Path) -> OutputPaths {
        let all = OutputPaths::for_input(input, self.out_dir.as_deref());
        OutputPaths {
            json: all.json.filter(|_| self.json),
            csv: all.csv.filter(|_| self.csv),
            memory_csv: all.memory_csv.filter(|_| self.memory),
        }
    }
}

/// Selected output files of `input`, in write order.
pub fn planned_outputs(input: &Path, settings: &ConversionSettings) -> Vec<PathBuf> {
    let paths = settings.output_paths(input);
    [paths.json, paths.csv, paths.memory_csv]
        .into_iter()
        .flatten()
        .collect()
}

/// Result of converting one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub source: PathBuf,
    pub outputs: Vec<PathBuf>,
    /// Informational notices (skipped memory trace, ...)
    pub notices: Vec<String>,
}

/// Check that `path` exists and carries a `.trs` extension
pub fn validate_input(path: &Path) -> Result<(), ConversionError> {
    if !path.is_file() {
        return Err(ConversionError::NotFound(path.to_path_buf()));
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if ext != "trs" {
        return Err(ConversionError::Extension(path.to_path_buf()));
    }
    Ok(())
}

/// Create the output directory (and parents) if missing
pub fn ensure_out_dir(dir: &Path) -> Result<(), ConversionError> {
    fs::create_dir_all(dir).map_err(|source| ConversionError::OutDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Convert one `.trs` file and write its selected outputs
pub fn convert_file(path: &Path, settings: &ConversionSettings) -> Result<FileReport, ConversionError> {
    validate_input(path)?;
    log::info!("Converting {}", path.display());

    let text = trs_io::read_trs_text(path)?;
    let wrap = |source: ConvertError| ConversionError::Convert {
        path: path.to_path_buf(),
        source,
    };

    let result = trs2csv::trs_to_traces(&text, &settings.trs_options()).map_err(wrap)?;

    let mut notices = Vec::new();
    if let Some(MemoryTrace::Skipped(reason)) = &result.memory {
        notices.push(format!("memory trace skipped: {}", reason));
    }

    let staged = trs2csv::stage_outputs(&result, &settings.output_paths(path)).map_err(wrap)?;
    let outputs = staged
        .commit()
        .map_err(|e| wrap(ConvertError::Write(e)))?;

    for o in &outputs {
        log::info!("  wrote {}", o.display());
    }

    Ok(FileReport {
        source: path.to_path_buf(),
        outputs,
        notices,
    })
}
