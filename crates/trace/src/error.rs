use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Trace ends mid-sample: {len} bytes is not a multiple of {sample_width}")]
    TruncatedSample { len: usize, sample_width: usize },
    #[error("Invalid scale factor: {0}")]
    InvalidScale(f64),
}

pub type Result<T> = std::result::Result<T, TraceError>;
