use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub files_processed: u64,
    pub bytes_written: u64,
}

impl RunStats {
    pub fn megabytes_written(&self) -> f64 {
        self.bytes_written as f64 / (1024.0 * 1024.0)
    }
}
