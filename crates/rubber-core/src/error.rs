use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid page count: {0} (an indicator needs at least one page)")]
    InvalidPageCount(usize),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
