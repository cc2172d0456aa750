use crate::error::{Result, TraceError};
use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Bytes per sample.
pub const SAMPLE_WIDTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// How to turn raw bytes into signal values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceFormat {
    pub endianness: Endianness,
    /// Multiplier applied to every decoded sample.
    pub scale: f64,
}

impl Default for TraceFormat {
    fn default() -> Self {
        Self {
            endianness: Endianness::Little,
            scale: 1.0,
        }
    }
}

impl TraceFormat {
    pub fn with_scale(scale: f64) -> Self {
        Self { scale, ..Self::default() }
    }

    fn check(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(TraceError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

/// Decodes `bytes` as 16-bit signed samples and multiplies each by `format.scale`.
pub fn decode_samples(bytes: &[u8], format: TraceFormat) -> Result<Vec<f64>> {
    format.check()?;
    if bytes.len() % SAMPLE_WIDTH != 0 {
        return Err(TraceError::TruncatedSample {
            len: bytes.len(),
            sample_width: SAMPLE_WIDTH,
        });
    }

    let mut raw = vec![0i16; bytes.len() / SAMPLE_WIDTH];
    match format.endianness {
        Endianness::Little => LittleEndian::read_i16_into(bytes, &mut raw),
        Endianness::Big => BigEndian::read_i16_into(bytes, &mut raw),
    }
    Ok(raw.into_iter().map(|s| s as f64 * format.scale).collect())
}

/// Inverse of [`decode_samples`]: divides by the scale, rounds, and saturates
/// to the 16-bit range.
pub fn encode_samples(samples: &[f64], format: TraceFormat) -> Result<Vec<u8>> {
    format.check()?;
    let mut out = Vec::with_capacity(samples.len() * SAMPLE_WIDTH);
    for &v in samples {
        let raw = (v / format.scale).round().clamp(i16::MIN as f64, i16::MAX as f64) as i16;
        match format.endianness {
            Endianness::Little => out.write_i16::<LittleEndian>(raw)?,
            Endianness::Big => out.write_i16::<BigEndian>(raw)?,
        }
    }
    Ok(out)
}

pub fn read_trace(path: impl AsRef<Path>, format: TraceFormat) -> Result<Vec<f64>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    decode_samples(&bytes, format)
}

pub fn write_trace(path: impl AsRef<Path>, samples: &[f64], format: TraceFormat) -> Result<()> {
    let bytes = encode_samples(samples, format)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
