use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE_COUNT: usize = 5000;
pub const DEFAULT_MIN_SIZE: u64 = 64;
pub const DEFAULT_MAX_SIZE: u64 = 500 * 1024;
pub const DEFAULT_REPORT_INTERVAL: u64 = 100;

/// Extensions typical of user documents; detectors weight these paths higher.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".docx", ".pdf", ".xlsx", ".jpg", ".png", ".txt", ".csv", ".pptx",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimOptions {
    pub file_count: usize,
    pub min_size: u64,
    pub max_size: u64,
    /// Emit a progress line every this many mutated files.
    pub report_interval: u64,
    pub extensions: Vec<String>,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            file_count: DEFAULT_FILE_COUNT,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            report_interval: DEFAULT_REPORT_INTERVAL,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> Result<()> {
        if self.file_count == 0 {
            return Err(SimError::Config("file_count must be at least 1".into()));
        }
        if self.report_interval == 0 {
            return Err(SimError::Config("report_interval must be at least 1".into()));
        }
        if self.min_size > self.max_size {
            return Err(SimError::Config(format!(
                "min_size {} exceeds max_size {}",
                self.min_size, self.max_size
            )));
        }
        if self.extensions.is_empty() {
            return Err(SimError::Config("extension set is empty".into()));
        }
        Ok(())
    }
}
