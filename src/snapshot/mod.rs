// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Codebook files: a fixed 48-byte header followed by the bincode body.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crc64fast::Digest;

use crate::codebook::Codebook;
use crate::error::{Result, VqError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub body_len: u64,
    /// Seconds since the Unix epoch at save time.
    pub timestamp: u64,
    /// CRC-64 of the body.
    pub checksum: u64,
    pub reserved: [u8; 16],
}

impl SnapshotHeader {
    pub const SIZE: usize = 4 + 4 + 8 + 8 + 8 + 16; // 48 bytes
    pub const MAGIC: [u8; 4] = *b"WVQC";
    pub const VERSION: u32 = 1;

    pub fn for_body(body: &[u8], timestamp: u64) -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            body_len: body.len() as u64,
            timestamp,
            checksum: crc64(body),
            reserved: [0; 16],
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.magic);
        buf[4..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8..16].copy_from_slice(&self.body_len.to_le_bytes());
        buf[16..24].copy_from_slice(&self.timestamp.to_le_bytes());
        buf[24..32].copy_from_slice(&self.checksum.to_le_bytes());
        buf[32..48].copy_from_slice(&self.reserved);
        buf
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = [0u8; Self::SIZE];
        reader.read_exact(&mut buf)?;

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&buf[0..4]);
        if magic != Self::MAGIC {
            return Err(VqError::Snapshot("invalid magic bytes in header".to_string()));
        }

        let version = u32::from_le_bytes(le_array(&buf[4..8]));
        if version != Self::VERSION {
            return Err(VqError::Snapshot(format!("unsupported format version {version}")));
        }

        let mut reserved = [0u8; 16];
        reserved.copy_from_slice(&buf[32..48]);

        Ok(Self {
            magic,
            version,
            body_len: u64::from_le_bytes(le_array(&buf[8..16])),
            timestamp: u64::from_le_bytes(le_array(&buf[16..24])),
            checksum: u64::from_le_bytes(le_array(&buf[24..32])),
            reserved,
        })
    }

    /// Fails unless `body` has the recorded length and checksum.
    pub fn verify(&self, body: &[u8]) -> Result<()> {
        if body.len() as u64 != self.body_len {
            return Err(VqError::Snapshot(format!(
                "body length mismatch: expected {}, found {}",
                self.body_len,
                body.len()
            )));
        }
        let found = crc64(body);
        if found != self.checksum {
            return Err(VqError::Snapshot(format!(
                "checksum mismatch: expected {:016x}, found {found:016x}",
                self.checksum
            )));
        }
        Ok(())
    }
}

fn le_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

pub fn crc64(data: &[u8]) -> u64 {
    let mut digest = Digest::new();
    digest.write(data);
    digest.sum64()
}

/// Writes `codebook` to `path` and returns the header that was written.
pub fn save_codebook(path: impl AsRef<Path>, codebook: &Codebook) -> Result<SnapshotHeader> {
    let body = codebook.to_bytes()?;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let header = SnapshotHeader::for_body(&body, timestamp);

    let mut file = File::create(path)?;
    file.write_all(&header.to_bytes())?;
    file.write_all(&body)?;
    file.sync_data()?;
    Ok(header)
}

pub fn read_header(path: impl AsRef<Path>) -> Result<SnapshotHeader> {
    let file = File::open(path)?;
    SnapshotHeader::read_from(file)
}

/// Reads and verifies a codebook file.
pub fn load_codebook(path: impl AsRef<Path>) -> Result<(SnapshotHeader, Codebook)> {
    let mut file = File::open(path)?;
    let header = SnapshotHeader::read_from(&mut file)?;
    let mut body = Vec::new();
    file.read_to_end(&mut body)?;
    header.verify(&body)?;
    let codebook = Codebook::from_bytes(&body)?;
    Ok((header, codebook))
}
