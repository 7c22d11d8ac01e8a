/// Batch conversion
///
/// Files are converted independently: a failing file is reported and the
/// rest of the batch continues unless fail-fast is requested. With more
/// than one job, files are pulled from a shared counter by scoped worker
/// threads; results are always reported in input order.
///
/// Output paths are claimed in input order before anything runs. A file
/// whose outputs would land on paths already claimed by an earlier file
/// (same stem in one output directory) fails instead of overwriting them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use super::conversion::{
    convert_file, planned_outputs, validate_input, ConversionError, ConversionSettings, FileReport,
};
use crate::log::conversion_log::{ConversionLog, Outcome};

/// Batch-level options
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub settings: ConversionSettings,
    /// Worker threads (1 = convert in the calling thread)
    pub jobs: usize,
    /// Stop at the first failing file
    pub fail_fast: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            settings: ConversionSettings::default(),
            jobs: 1,
            fail_fast: false,
        }
    }
}

/// Counts of a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
    pub not_attempted: usize,
}

impl BatchSummary {
    pub fn success(&self) -> bool {
        self.failed == 0 && self.not_attempted == 0
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} converted, {} failed, {} not attempted",
            self.converted, self.failed, self.not_attempted
        )
    }
}

type FileResult = Result<FileReport, ConversionError>;

/// Output already claimed by an earlier file: `(output, first claimant)`.
type Collision = Option<(PathBuf, PathBuf)>;

/// Claim every valid input's outputs in input order.
fn find_collisions(files: &[PathBuf], settings: &ConversionSettings) -> Vec<Collision> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    files
        .iter()
        .map(|path| {
            if validate_input(path).is_err() {
                return None;
            }
            let outputs = planned_outputs(path, settings);
            if let Some((output, first)) = outputs
                .iter()
                .find_map(|o| claimed.get(o).map(|first| (o.clone(), first.to_path_buf())))
            {
                return Some((output, first));
            }
            for o in outputs {
                claimed.insert(o, path.as_path());
            }
            None
        })
        .collect()
}

fn convert_claimed(path: &Path, collision: &Collision, settings: &ConversionSettings) -> FileResult {
    match collision {
        Some((output, first)) => Err(ConversionError::OutputCollision {
            path: path.to_path_buf(),
            output: output.clone(),
            first: first.clone(),
        }),
        None => convert_file(path, settings),
    }
}

/// Convert every file, recording each one in `log`
pub fn run_batch(files: &[PathBuf], opts: &BatchOptions, log: &mut ConversionLog) -> BatchSummary {
    let collisions = find_collisions(files, &opts.settings);
    let results = if opts.jobs <= 1 || files.len() <= 1 {
        convert_sequential(files, &collisions, opts)
    } else {
        convert_parallel(files, &collisions, opts)
    };

    let mut summary = BatchSummary::default();
    for (path, result) in files.iter().zip(results) {
        match result {
            Some(Ok(report)) => {
                for n in &report.notices {
                    log::info!("{}: {}", path.display(), n);
                }
                let outputs: Vec<String> = report
                    .outputs
                    .iter()
                    .map(|o| o.display().to_string())
                    .collect();
                log.record(path, Outcome::Converted, &outputs, &report.notices.join("; "));
                summary.converted += 1;
            }
            Some(Err(e)) => {
                log::error!("{}", e);
                log.record(path, Outcome::Failed, &[], &e.to_string());
                summary.failed += 1;
            }
            None => {
                log::warn!("{}: not attempted after an earlier failure", path.display());
                log.record(path, Outcome::NotAttempted, &[], "");
                summary.not_attempted += 1;
            }
        }
    }
    summary
}

fn convert_sequential(
    files: &[PathBuf],
    collisions: &[Collision],
    opts: &BatchOptions,
) -> Vec<Option<FileResult>> {
    let mut results = Vec::with_capacity(files.len());
    let mut stop = false;
    for (path, collision) in files.iter().zip(collisions) {
        if stop {
            results.push(None);
            continue;
        }
        let result = convert_claimed(path, collision, &opts.settings);
        stop = opts.fail_fast && result.is_err();
        results.push(Some(result));
    }
    results
}

fn convert_parallel(
    files: &[PathBuf],
    collisions: &[Collision],
    opts: &BatchOptions,
) -> Vec<Option<FileResult>> {
    let jobs = opts.jobs.min(files.len());
    let next = &AtomicUsize::new(0);
    let abort = &AtomicBool::new(false);
    let mut results: Vec<Option<FileResult>> = (0..files.len()).map(|_| None).collect();

    log::debug!("converting {} files on {} threads", files.len(), jobs);

    thread::scope(|s| {
        let workers: Vec<_> = (0..jobs)
            .map(|_| {
                s.spawn(move || {
                    let mut done = Vec::new();
                    while !abort.load(Ordering::Relaxed) {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        let Some(path) = files.get(i) else { break };
                        let result = convert_claimed(path, &collisions[i], &opts.settings);
                        if opts.fail_fast && result.is_err() {
                            abort.store(true, Ordering::Relaxed);
                        }
                        done.push((i, result));
                    }
                    done
                })
            })
            .collect();

        for w in workers {
            match w.join() {
                Ok(done) => {
                    for (i, result) in done {
                        results[i] = Some(result);
                    }
                }
                Err(_) => log::error!("conversion worker panicked"),
            }
        }
    });

    results
}
