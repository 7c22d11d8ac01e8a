pub mod batch;
pub mod conversion;

#[cfg(test)]
mod tests {
    use super::batch::{run_batch, BatchOptions, BatchSummary};
    use super::conversion::{self, ConversionError, ConversionSettings};
    use crate::log::conversion_log::{ConversionLog, Outcome};
    use std::fs;
    use std::path::{Path, PathBuf};

    const SWEEP: &str = "\
[VNAGloble]
m_f64StartFreq=1000.0
m_f64StopFreq=2000.0
m_strName=S11%20Sweep
[Trace]
size=3
1%5Bampy%5D=0.1
1%5Bampz%5D=0.2
2%5Bampy%5D=0.3
2%5Bampz%5D=0.4
3%5Bampy%5D=0.5
3%5Bampz%5D=0.6
[MemTrace]
size=0
";

    const WITH_MEMORY: &str = "\
[VNAGloble]
m_f64StartFreq=0
m_f64StopFreq=10
[Trace]
size=2
1-%3Eampy=1
1-%3Eampz=2
2-%3Eampy=3
2-%3Eampz=4
[MemTrace]
size=2
1-%3Eampy=5
1-%3Eampz=6
2-%3Eampy=7
2-%3Eampz=8
";

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, content).unwrap();
        p
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_convert_file_writes_json_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "sweep.trs", SWEEP);

        let report = conversion::convert_file(&input, &ConversionSettings::default()).unwrap();
        assert_eq!(report.outputs.len(), 2);
        assert_eq!(report.notices, ["memory trace skipped: [MemTrace] holds no data (size=0)"]);
        assert_eq!(listing(dir.path()), ["sweep.csv", "sweep.json", "sweep.trs"]);

        let csv = fs::read_to_string(dir.path().join("sweep.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "frequency,real,imaginary");
        assert_eq!(lines[2], "1500.0,0.3,0.4");

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("sweep.json")).unwrap())
                .unwrap();
        assert_eq!(json["VNAGloble"]["m_strName"], "S11%20Sweep");
        assert_eq!(json["Trace"]["2"]["ampy"], 0.3);
        assert_eq!(json["Trace"]["size"], 3);
    }

    #[test]
    fn test_memory_trace_written_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out/nested");
        let input = write(dir.path(), "mem.TRS", WITH_MEMORY);

        let settings = ConversionSettings {
            json: false,
            out_dir: Some(out.clone()),
            ..ConversionSettings::default()
        };
        conversion::ensure_out_dir(&out).unwrap();
        let report = conversion::convert_file(&input, &settings).unwrap();
        assert!(report.notices.is_empty());
        assert_eq!(listing(&out), ["mem.csv", "mem_memory.csv"]);

        let mem = fs::read_to_string(out.join("mem_memory.csv")).unwrap();
        assert_eq!(mem, "frequency,real,imaginary\n0.0,5.0,6.0\n10.0,7.0,8.0\n");
    }

    #[test]
    fn test_json_only_skips_trace_checks() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "cfg.trs", "[Settings]\na%5Bb%5D=1\n");
        let settings = ConversionSettings {
            csv: false,
            memory: false,
            ..ConversionSettings::default()
        };
        let report = conversion::convert_file(&input, &settings).unwrap();
        assert_eq!(report.outputs, [dir.path().join("cfg.json")]);
    }

    #[test]
    fn test_input_validation() {
        let dir = tempfile::tempdir().unwrap();
        let txt = write(dir.path(), "sweep.txt", SWEEP);
        assert!(matches!(
            conversion::validate_input(&txt),
            Err(ConversionError::Extension(_))
        ));
        assert!(matches!(
            conversion::validate_input(&dir.path().join("none.trs")),
            Err(ConversionError::NotFound(_))
        ));
    }

    #[test]
    fn test_failed_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // record 3 lacks ampz: the JSON would be fine, but nothing is written
        let broken = SWEEP.replace("3%5Bampz%5D=0.6\n", "");
        let input = write(dir.path(), "broken.trs", &broken);

        let err = conversion::convert_file(&input, &ConversionSettings::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("broken.trs"), "{msg}");
        assert!(msg.contains("3/ampz"), "{msg}");
        assert_eq!(listing(dir.path()), ["broken.trs"]);
    }

    #[test]
    fn test_batch_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.trs", "orphan=1\n[VNAGloble]\n");
        let good = write(dir.path(), "good.trs", SWEEP);

        let mut log = ConversionLog::new();
        let summary = run_batch(&[bad, good], &BatchOptions::default(), &mut log);
        assert_eq!(
            summary,
            BatchSummary {
                converted: 1,
                failed: 1,
                not_attempted: 0
            }
        );
        assert!(!summary.success());
        assert!(dir.path().join("good.csv").exists());
        assert!(!dir.path().join("bad.json").exists());
        assert_eq!(log.entries[0].outcome, Outcome::Failed);
        assert!(log.entries[0].detail.contains("line 1"));
        assert_eq!(log.entries[1].outcome, Outcome::Converted);
    }

    #[test]
    fn test_same_stem_into_one_out_dir_fails_later_file() {
        let dir = tempfile::tempdir().unwrap();
        let one = "[VNAGloble]\nm_f64StartFreq=0\nm_f64StopFreq=0\n[Trace]\nsize=1\n1-%3Eampy=111\n1-%3Eampz=0\n";
        let two = one.replace("111", "222");
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        let first = write(&dir.path().join("a"), "run.trs", one);
        let second = write(&dir.path().join("b"), "run.trs", &two);
        let out = dir.path().join("out");

        let opts = BatchOptions {
            settings: ConversionSettings {
                out_dir: Some(out.clone()),
                ..ConversionSettings::default()
            },
            ..BatchOptions::default()
        };
        conversion::ensure_out_dir(&out).unwrap();
        let mut log = ConversionLog::new();
        let summary = run_batch(&[first, second], &opts, &mut log);

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(listing(&out), ["run.csv", "run.json"]);
        let csv = fs::read_to_string(out.join("run.csv")).unwrap();
        assert_eq!(csv, "frequency,real,imaginary\n0.0,111.0,0.0\n");
        assert_eq!(log.entries[1].outcome, Outcome::Failed);
        assert!(log.entries[1].detail.contains("already claimed"), "{}", log.entries[1].detail);
    }

    #[test]
    fn test_collision_reported_with_parallel_jobs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("x")).unwrap();
        let files = vec![
            write(dir.path(), "s.trs", SWEEP),
            write(&dir.path().join("x"), "s.trs", SWEEP),
            write(dir.path(), "t.trs", SWEEP),
        ];
        let opts = BatchOptions {
            settings: ConversionSettings {
                out_dir: Some(dir.path().join("out")),
                ..ConversionSettings::default()
            },
            jobs: 3,
            ..BatchOptions::default()
        };
        conversion::ensure_out_dir(&dir.path().join("out")).unwrap();
        let mut log = ConversionLog::new();
        let summary = run_batch(&files, &opts, &mut log);
        assert_eq!(summary.converted, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(log.entries[1].outcome, Outcome::Failed);
        assert!(!dir.path().join("out/s.csv.tmp").exists());
    }

    #[test]
    fn test_fail_fast_stops_batch() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write(dir.path(), "a.trs", SWEEP),
            write(dir.path(), "b.trs", "nonsense\n"),
            write(dir.path(), "c.trs", SWEEP),
        ];
        let opts = BatchOptions {
            fail_fast: true,
            ..BatchOptions::default()
        };
        let mut log = ConversionLog::new();
        let summary = run_batch(&files, &opts, &mut log);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.not_attempted, 1);
        assert!(!dir.path().join("c.csv").exists());
    }

    #[test]
    fn test_parallel_batch_matches_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = Vec::new();
        for i in 0..8 {
            let content = if i == 5 { "[Trace]\nsize=1\n" } else { SWEEP };
            files.push(write(dir.path(), &format!("f{i}.trs"), content));
        }
        let opts = BatchOptions {
            jobs: 3,
            ..BatchOptions::default()
        };
        let mut log = ConversionLog::new();
        let summary = run_batch(&files, &opts, &mut log);
        assert_eq!(summary.converted, 7);
        assert_eq!(summary.failed, 1);
        for (i, entry) in log.entries.iter().enumerate() {
            assert!(entry.source.ends_with(&format!("f{i}.trs")));
            let expected = if i == 5 { Outcome::Failed } else { Outcome::Converted };
            assert_eq!(entry.outcome, expected);
        }
    }
}
