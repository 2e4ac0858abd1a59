use ransim_core::crypto::seal::BLOB_OVERHEAD;
use ransim_core::{CancelToken, Outcome, SealKey, SimOptions, Workspace, simulate};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use walkdir::WalkDir;

fn tiny_opts(file_count: usize) -> SimOptions {
    SimOptions {
        file_count,
        min_size: 64,
        max_size: 192,
        ..Default::default()
    }
}

fn workdir_from(output: &str) -> PathBuf {
    output
        .lines()
        .find_map(|l| l.strip_prefix("Writing to: "))
        .map(PathBuf::from)
        .expect("workdir line")
}

#[test]
fn full_run_completes_and_removes_the_workspace() {
    let opts = tiny_opts(3);
    let mut out = Vec::new();

    let report = simulate(&opts, &CancelToken::new(), &mut out).unwrap();

    assert!(matches!(report.outcome, Outcome::Completed));
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.stats.files_processed, 3);
    // Ramp 64..192 over three files: 64 + 128 + 192 plaintext bytes.
    assert_eq!(
        report.stats.bytes_written,
        64 + 128 + 192 + 3 * BLOB_OVERHEAD as u64
    );

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Phase 1: Seeding 3 realistic files..."));
    assert!(text.contains("  Seeded 3 files"));
    assert!(text.contains("Phase 2: Encrypting files in-place..."));
    assert!(text.contains("Completed. 3 files"));
    assert!(text.contains("Detector did NOT intervene."));

    assert!(!workdir_from(&text).exists());
}

/// Sink that trips the token as soon as the first progress line lands,
/// so the interruption hits a deterministic item boundary.
struct TripOnProgress {
    buf: Vec<u8>,
    token: CancelToken,
}

impl Write for TripOnProgress {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(data);
        if !self.token.is_tripped() {
            if let Ok(text) = std::str::from_utf8(&self.buf) {
                if text.contains(" files  |") {
                    self.token.trip(15);
                }
            }
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn interruption_stops_at_an_item_boundary_with_exact_count() {
    let opts = SimOptions {
        report_interval: 1,
        ..tiny_opts(10)
    };
    let token = CancelToken::new();
    let mut out = TripOnProgress {
        buf: Vec::new(),
        token: token.clone(),
    };

    let report = simulate(&opts, &token, &mut out).unwrap();

    assert!(matches!(report.outcome, Outcome::Interrupted(15)));
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.stats.files_processed, 1);

    let text = String::from_utf8(out.buf).unwrap();
    assert!(text.contains("*** BLOCKED/KILLED by SIGTERM after 1 files in"));
    assert!(!workdir_from(&text).exists());
}

/// Sink that simulates a detector revoking access: once the first progress
/// line lands, it deletes the next plaintext source so the engine hits an
/// I/O failure at a known position.
struct RevokeOnProgress {
    buf: Vec<u8>,
    workdir: Option<PathBuf>,
    revoked: bool,
}

impl Write for RevokeOnProgress {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(data);
        if let Ok(text) = std::str::from_utf8(&self.buf) {
            if self.workdir.is_none() {
                // Only trust fully written lines for the path.
                let complete = &text[..text.rfind('\n').map_or(0, |p| p + 1)];
                self.workdir = complete
                    .lines()
                    .find_map(|l| l.strip_prefix("Writing to: "))
                    .map(PathBuf::from);
            }
            if !self.revoked && text.contains(" files  |") {
                if let Some(dir) = &self.workdir {
                    let mut plain: Vec<PathBuf> = std::fs::read_dir(dir)
                        .unwrap()
                        .filter_map(|e| e.ok())
                        .map(|e| e.path())
                        .filter(|p| p.extension().is_none_or(|x| x != "enc"))
                        .collect();
                    plain.sort();
                    if let Some(victim) = plain.first() {
                        std::fs::remove_file(victim).unwrap();
                        self.revoked = true;
                    }
                }
            }
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn io_failure_blocks_the_run_with_exact_count() {
    let opts = SimOptions {
        report_interval: 1,
        ..tiny_opts(10)
    };
    let mut out = RevokeOnProgress {
        buf: Vec::new(),
        workdir: None,
        revoked: false,
    };

    let report = simulate(&opts, &CancelToken::new(), &mut out).unwrap();

    assert!(matches!(report.outcome, Outcome::Blocked(_)));
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.stats.files_processed, 1);
    assert!(out.revoked);

    let text = String::from_utf8(out.buf).unwrap();
    assert!(text.contains("*** BLOCKED by I/O error after 1 files in"));
    assert!(!workdir_from(&text).exists());
}

#[test]
fn mutation_leaves_exactly_n_encrypted_files() {
    let mut ws = Workspace::acquire().unwrap();
    let opts = tiny_opts(5);
    let token = CancelToken::new();
    let key = SealKey::from_bytes([3u8; 32]);

    let mut sink: Vec<u8> = Vec::new();
    let items = ransim_core::corpus::seed(ws.path(), &opts, &token).unwrap();
    let originals: HashMap<String, Vec<u8>> = items
        .iter()
        .map(|it| {
            let bytes = std::fs::read(ws.path().join(&it.name)).unwrap();
            (format!("{}.enc", it.name), bytes)
        })
        .collect();
    let report = ransim_core::engine::mutate(ws.path(), &items, &key, &opts, &token, &mut sink);
    assert!(matches!(report.outcome, Outcome::Completed));

    let files: Vec<_> = WalkDir::new(ws.path())
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();
    assert_eq!(files.len(), 5);
    assert!(
        files
            .iter()
            .all(|e| e.path().extension().is_some_and(|x| x == "enc"))
    );

    // Every replacement decrypts back to the exact seeded plaintext.
    for entry in &files {
        let name = entry.file_name().to_string_lossy().into_owned();
        let blob = std::fs::read(entry.path()).unwrap();
        assert_eq!(key.open(&blob).unwrap(), originals[name.as_str()]);
    }

    ws.release();
    assert!(!ws.path().exists());
}
