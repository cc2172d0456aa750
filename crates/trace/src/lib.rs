//! Reading raw sample traces: consecutive signed 16-bit integers, scaled to `f64`.

pub mod error;
pub mod reader;

pub use error::{Result, TraceError};
pub use reader::{decode_samples, encode_samples, read_trace, write_trace, Endianness, TraceFormat};
