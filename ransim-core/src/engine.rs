use crate::config::{DEFAULT_REPORT_INTERVAL, SimOptions};
use crate::corpus::{self, WorkItem};
use crate::crypto::seal::SealKey;
use crate::interrupt::CancelToken;
use crate::report;
use crate::stats::RunStats;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

pub const ENCRYPTED_SUFFIX: &str = ".enc";

/// How a mutation run ended. Blocked and Interrupted are expected results
/// when something intervenes, so they are outcomes rather than errors.
#[derive(Debug)]
pub enum Outcome {
    Completed,
    Blocked(std::io::Error),
    Interrupted(i32),
}

#[derive(Debug)]
pub struct RunReport {
    pub stats: RunStats,
    pub elapsed: Duration,
    pub outcome: Outcome,
}

impl RunReport {
    pub fn exit_code(&self) -> u8 {
        match self.outcome {
            Outcome::Completed => 0,
            _ => 1,
        }
    }
}

/// Phase 2: encrypt-and-replace every item in order, one at a time.
/// The token is consulted between items only; in-flight file I/O is never
/// cancelled. Report lines go to `out`; failures to write them are ignored.
/// A zero `report_interval` falls back to the default cadence.
pub fn mutate<W: Write>(
    workdir: &Path,
    items: &[WorkItem],
    key: &SealKey,
    opts: &SimOptions,
    token: &CancelToken,
    out: &mut W,
) -> RunReport {
    let t0 = Instant::now();
    let mut stats = RunStats::default();
    let interval = effective_interval(opts.report_interval);

    for (i, item) in items.iter().enumerate() {
        if let Some(signo) = token.signal() {
            let _ = writeln!(
                out,
                "{}",
                report::killed_line(signo, stats.files_processed, t0.elapsed())
            );
            return RunReport {
                stats,
                elapsed: t0.elapsed(),
                outcome: Outcome::Interrupted(signo),
            };
        }

        match mutate_one(workdir, item, key) {
            Ok(written) => {
                stats.files_processed += 1;
                stats.bytes_written += written;
            }
            Err(err) => {
                let _ = writeln!(
                    out,
                    "{}",
                    report::blocked_lines(&err, stats.files_processed, t0.elapsed())
                );
                return RunReport {
                    stats,
                    elapsed: t0.elapsed(),
                    outcome: Outcome::Blocked(err),
                };
            }
        }

        if stats.files_processed % interval == 0 {
            let approx = corpus::target_size(i, items.len(), opts.min_size, opts.max_size);
            let _ = writeln!(
                out,
                "{}",
                report::progress_line(stats.files_processed, approx, stats.bytes_written, t0.elapsed())
            );
        }
    }

    let _ = writeln!(out, "{}", report::completed_lines(&stats, t0.elapsed()));
    RunReport {
        stats,
        elapsed: t0.elapsed(),
        outcome: Outcome::Completed,
    }
}

// The replacement is written before the original is removed; a hard kill
// between the two steps leaves both files behind.
fn mutate_one(workdir: &Path, item: &WorkItem, key: &SealKey) -> std::io::Result<u64> {
    let src = workdir.join(&item.name);
    let dst = workdir.join(format!("{}{ENCRYPTED_SUFFIX}", item.name));

    let plaintext = fs::read(&src)?;
    let blob = key.seal(&plaintext);
    fs::write(&dst, &blob)?;
    fs::remove_file(&src)?;
    Ok(blob.len() as u64)
}

fn effective_interval(interval: u64) -> u64 {
    if interval == 0 {
        DEFAULT_REPORT_INTERVAL
    } else {
        interval
    }
}
