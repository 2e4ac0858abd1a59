use crate::config::SimOptions;
use crate::error::{Result, SimError};
use crate::interrupt::CancelToken;
use rand::seq::SliceRandom;
use std::fs;
use std::path::Path;

// Repeating prose keeps seeded files compressible, like real documents.
const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo \
consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse \
cillum dolore eu fugiat nulla pariatur.\n";

/// One seeded file, recorded in generation order.
#[derive(Clone, Debug)]
pub struct WorkItem {
    pub name: String,
    pub target_size: u64,
}

/// Size of file `index` on the linear ramp from `min` to `max`.
/// A single-file corpus sits at `min`.
pub fn target_size(index: usize, count: usize, min: u64, max: u64) -> u64 {
    let denom = count.saturating_sub(1).max(1);
    let frac = index as f64 / denom as f64;
    min + (frac * (max - min) as f64) as u64
}

/// Phase 1: populate `dir` with low-entropy documents and return them in
/// generation order. The token is checked at each file boundary so a signal
/// stops seeding without leaving a partially written file behind.
pub fn seed(dir: &Path, opts: &SimOptions, token: &CancelToken) -> Result<Vec<WorkItem>> {
    let mut rng = rand::thread_rng();
    let mut items = Vec::with_capacity(opts.file_count);

    for i in 0..opts.file_count {
        if token.is_tripped() {
            break;
        }
        let size = target_size(i, opts.file_count, opts.min_size, opts.max_size);
        let ext = opts
            .extensions
            .choose(&mut rng)
            .ok_or_else(|| SimError::Config("extension set is empty".into()))?;
        let name = format!("document_{i:06}{ext}");
        fs::write(dir.join(&name), fill_text(size as usize))?;
        items.push(WorkItem {
            name,
            target_size: size,
        });
    }

    tracing::debug!(seeded = items.len(), "corpus ready");
    Ok(items)
}

fn fill_text(len: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(len + LOREM.len());
    while buf.len() < len {
        buf.extend_from_slice(LOREM.as_bytes());
    }
    buf.truncate(len);
    buf
}
