use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid options: {0}")]
    Config(String),

    #[error("crypto error: {0}")]
    Crypto(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, SimError>;
