//! Error handling for the driver binary: every I/O or config error that
//! can surface while discovering fixtures, loading `tacc.toml`, or
//! writing result files.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A diagnostic surfaced from the core crates (lexing/parsing), already
    /// rendered to text — the core never hands the driver a `thiserror`
    /// value directly, only `Display`-ed diagnostics.
    #[error("{0}")]
    Core(String),
}

pub type Result<T> = std::result::Result<T, DriverError>;
