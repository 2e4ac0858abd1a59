use crate::config::SimOptions;
use crate::corpus;
use crate::crypto::seal::SealKey;
use crate::engine::{self, Outcome, RunReport};
use crate::entropy;
use crate::error::Result;
use crate::interrupt::CancelToken;
use crate::report;
use crate::stats::RunStats;
use crate::workspace::Workspace;
use std::io::Write;
use std::time::Duration;

/// Run both phases end to end: validate, acquire a workspace, seed the
/// corpus, mutate it in place, and tear the workspace down on every path.
/// Setup failures come back as errors; Blocked and Interrupted come back
/// as the report's outcome.
pub fn simulate<W: Write>(
    opts: &SimOptions,
    token: &CancelToken,
    out: &mut W,
) -> Result<RunReport> {
    opts.validate()?;
    let key = SealKey::generate()?;
    let mut ws = Workspace::acquire()?;

    let _ = writeln!(out, "Writing to: {}", ws.path().display());
    let _ = writeln!(out, "Phase 1: Seeding {} realistic files...", opts.file_count);

    // On seeding errors the workspace is swept by Drop.
    let items = corpus::seed(ws.path(), opts, token)?;

    if let Some(signo) = token.signal() {
        let _ = writeln!(out, "{}", report::killed_line(signo, 0, Duration::ZERO));
        ws.release();
        return Ok(RunReport {
            stats: RunStats::default(),
            elapsed: Duration::ZERO,
            outcome: Outcome::Interrupted(signo),
        });
    }

    let _ = writeln!(out, "  Seeded {} files", items.len());
    let _ = writeln!(out, "Phase 2: Encrypting files in-place...");

    if !items.is_empty() && tracing::enabled!(tracing::Level::DEBUG) {
        if let Ok(sample) = std::fs::read(ws.path().join(&items[0].name)) {
            tracing::debug!(
                bits_per_byte = entropy::shannon(&sample),
                zstd_ratio = entropy::compression_ratio(&sample).ok(),
                "corpus sample"
            );
        }
    }

    let report = engine::mutate(ws.path(), &items, &key, opts, token, out);
    ws.release();
    Ok(report)
}
