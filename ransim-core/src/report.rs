use crate::interrupt::describe_signal;
use crate::stats::RunStats;
use std::time::Duration;

/// Printed after a full, uninterrupted run.
pub const NO_INTERVENTION: &str = "Detector did NOT intervene.";

/// Periodic progress line. `approx_size` is the ramp size at the current
/// position, shown as a rough per-file KB figure.
pub fn progress_line(count: u64, approx_size: u64, bytes_written: u64, elapsed: Duration) -> String {
    let kb = approx_size / 1024;
    let mb = bytes_written as f64 / (1024.0 * 1024.0);
    let secs = elapsed.as_secs_f64();
    format!(
        "  {count} files  |  ~{kb:>3} KB each  |  {mb:.1} MB total  |  {secs:.2}s  |  {:.0} files/s",
        rate(count, secs)
    )
}

pub fn completed_lines(stats: &RunStats, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    format!(
        "\nCompleted. {} files, {:.1} MB in {secs:.2}s ({:.0} files/s)\n{NO_INTERVENTION}",
        stats.files_processed,
        stats.megabytes_written(),
        rate(stats.files_processed, secs)
    )
}

pub fn blocked_lines(err: &std::io::Error, count: u64, elapsed: Duration) -> String {
    let label = match err.kind() {
        std::io::ErrorKind::PermissionDenied => "permission denied",
        _ => "I/O error",
    };
    format!(
        "\n*** BLOCKED by {label} after {count} files in {:.2}s ***\n  {err}",
        elapsed.as_secs_f64()
    )
}

pub fn killed_line(signo: i32, count: u64, elapsed: Duration) -> String {
    format!(
        "\n*** BLOCKED/KILLED by {} after {count} files in {:.2}s ***",
        describe_signal(signo),
        elapsed.as_secs_f64()
    )
}

fn rate(count: u64, secs: f64) -> f64 {
    if secs > 0.0 { count as f64 / secs } else { 0.0 }
}
