#![forbid(unsafe_code)]

pub mod config;
pub mod corpus;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod interrupt;
pub mod report;
pub mod sim;
pub mod stats;
pub mod workspace;

pub mod crypto {
    pub mod seal;
}

// Re-exports: stable API surface
pub use config::SimOptions;
pub use crypto::seal::SealKey;
pub use engine::{Outcome, RunReport};
pub use error::{Result, SimError};
pub use interrupt::CancelToken;
pub use sim::simulate;
pub use stats::RunStats;
pub use workspace::Workspace;
