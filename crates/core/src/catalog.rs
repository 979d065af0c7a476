//! Catalog module - decoder for the binary tile catalog
//!
//! The catalog is a flat sequence of big-endian 4-byte values:
//!
//! ```text
//! i32 tile_count
//! repeat tile_count:
//!   i32 tile_id
//!   i32 line_count
//!   repeat line_count:
//!     f32 x1, f32 y1, f32 x2, f32 y2
//! ```
//!
//! Coordinates are truncated toward zero as they are read and must be finite
//! and within [`MAX_COORDINATE`] of the origin. The buffer must be consumed
//! exactly; short buffers and trailing bytes are both rejected.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::tile::TileRecord;
use crate::types::Segment;

/// Width of every value in the catalog
const WORD: usize = 4;

/// Largest coordinate magnitude a catalog may carry
pub const MAX_COORDINATE: f32 = 1_000_000.0;

/// Errors raised while obtaining or decoding a catalog
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    Unavailable { path: PathBuf, source: io::Error },
    /// A read ran past the end of the buffer.
    Truncated { offset: usize, len: usize },
    /// Decoding finished with bytes left over.
    LengthMismatch { expected: usize, actual: usize },
    /// A tile or line count was negative.
    NegativeCount { offset: usize, value: i32 },
    /// A coordinate was not finite or lay beyond [`MAX_COORDINATE`].
    CoordinateOutOfRange { offset: usize, value: f32 },
}

impl CatalogError {
    /// True for every decode failure (as opposed to a missing source)
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::Unavailable { .. })
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { path, source } => {
                write!(f, "catalog {} unavailable: {}", path.display(), source)
            }
            Self::Truncated { offset, len } => write!(
                f,
                "catalog truncated: 4-byte read at offset {} exceeds length {}",
                offset, len
            ),
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "catalog length mismatch: decoded {} bytes of {}",
                expected, actual
            ),
            Self::NegativeCount { offset, value } => {
                write!(f, "catalog count at offset {} is negative ({})", offset, value)
            }
            Self::CoordinateOutOfRange { offset, value } => write!(
                f,
                "catalog coordinate at offset {} is out of range ({})",
                offset, value
            ),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Read position over a catalog buffer
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn word(&mut self) -> Result<[u8; WORD], CatalogError> {
        let end = self.offset + WORD;
        let Some(chunk) = self.bytes.get(self.offset..end) else {
            return Err(CatalogError::Truncated {
                offset: self.offset,
                len: self.bytes.len(),
            });
        };
        let mut word = [0u8; WORD];
        word.copy_from_slice(chunk);
        self.offset = end;
        Ok(word)
    }

    fn read_i32(&mut self) -> Result<i32, CatalogError> {
        self.word().map(i32::from_be_bytes)
    }

    /// Read one coordinate, truncated toward zero
    fn read_coord(&mut self) -> Result<f32, CatalogError> {
        let offset = self.offset;
        let value = self.word().map(f32::from_be_bytes)?;
        if !value.is_finite() || value.abs() > MAX_COORDINATE {
            return Err(CatalogError::CoordinateOutOfRange { offset, value });
        }
        Ok(value)
    }

    fn read_count(&mut self) -> Result<usize, CatalogError> {
        let offset = self.offset;
        let value = self.read_i32()?;
        usize::try_from(value).map_err(|_| CatalogError::NegativeCount { offset, value })
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }
}

/// Decode a catalog buffer into tile records, in input order
pub fn decode(bytes: &[u8]) -> Result<Vec<TileRecord>, CatalogError> {
    let mut cursor = Cursor::new(bytes);
    let tile_count = cursor.read_count()?;

    // Each tile needs at least 8 bytes, which bounds the allocation for hostile counts.
    let mut records = Vec::with_capacity(tile_count.min(cursor.remaining() / (2 * WORD)));
    for _ in 0..tile_count {
        let id = cursor.read_i32()?;
        let line_count = cursor.read_count()?;

        let mut segments = Vec::with_capacity(line_count.min(cursor.remaining() / (4 * WORD)));
        for _ in 0..line_count {
            let coords = [
                cursor.read_coord()?,
                cursor.read_coord()?,
                cursor.read_coord()?,
                cursor.read_coord()?,
            ];
            segments.push(Segment::from_f32(coords));
        }
        records.push(TileRecord::new(id, segments));
    }

    if cursor.remaining() != 0 {
        return Err(CatalogError::LengthMismatch {
            expected: cursor.offset,
            actual: bytes.len(),
        });
    }

    Ok(records)
}

/// Read and decode a catalog file
pub fn load(path: &Path) -> Result<Vec<TileRecord>, CatalogError> {
    let bytes = std::fs::read(path).map_err(|source| CatalogError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}

/// Exact byte length of the encoding of `records`
pub fn encoded_len(records: &[TileRecord]) -> usize {
    WORD + records
        .iter()
        .map(|r| 2 * WORD + r.line_count() * 4 * WORD)
        .sum::<usize>()
}

/// Encode records in the catalog format.
///
/// Coordinates are written as `f32`; rotation values are not part of the format.
pub fn encode(records: &[TileRecord]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(records));
    out.extend_from_slice(&(records.len() as i32).to_be_bytes());
    for record in records {
        out.extend_from_slice(&record.id.to_be_bytes());
        out.extend_from_slice(&(record.line_count() as i32).to_be_bytes());
        for s in &record.segments {
            for v in [s.x1, s.y1, s.x2, s.y2] {
                out.extend_from_slice(&(v as f32).to_be_bytes());
            }
        }
    }
    out
}
