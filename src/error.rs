use thiserror::Error;

/// Errors surfaced while generating or writing a fixture document.
#[derive(Error, Debug)]
pub enum Error {
    /// Clock arithmetic or timestamp parsing failed.
    #[error("clock error: {0}")]
    Clock(#[from] jiff::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
