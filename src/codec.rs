//! Compression codec registry.
//!
//! Codecs are identified by the *outer* file-name extension (`data.json.gz`
//! selects gzip).  The extension table is a process-wide constant: codecs are
//! registered here at compile time and never mutated, so concurrent read-only
//! use needs no locking.
//!
//! Every codec operates on whole buffers.  Format handlers load full content
//! into memory by contract, so there is nothing to stream; it also means the
//! only open file handle lives inside `fs::read`/`fs::write` and cannot
//! outlive a call.

use std::io::{Cursor, Read, Write};

use crate::error::{AnyfileError, Result};

// ── Compression discriminant ─────────────────────────────────────────────────

/// Runtime compression discriminant.  `None` means the payload is stored
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl Compression {
    /// Resolve an extension (leading dot included) to a codec.
    ///
    /// Matching is exact: `.GZ` is not `.gz`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".gz"            => Some(Compression::Gzip),
            ".bz2"           => Some(Compression::Bzip2),
            ".xz"            => Some(Compression::Xz),
            ".zst" | ".zstd" => Some(Compression::Zstd),
            _                => None,
        }
    }

    /// Parse from a CLI string.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none"  => Some(Compression::None),
            "gzip"  => Some(Compression::Gzip),
            "bzip2" => Some(Compression::Bzip2),
            "xz"    => Some(Compression::Xz),
            "zstd"  => Some(Compression::Zstd),
            _       => None,
        }
    }

    /// Human-readable name (for diagnostics only — never parsed).
    pub fn name(self) -> &'static str {
        match self {
            Compression::None  => "none",
            Compression::Gzip  => "gzip",
            Compression::Bzip2 => "bzip2",
            Compression::Xz    => "xz",
            Compression::Zstd  => "zstd",
        }
    }

    /// Extensions this codec claims, leading dot included.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Compression::None  => &[],
            Compression::Gzip  => &[".gz"],
            Compression::Bzip2 => &[".bz2"],
            Compression::Xz    => &[".xz"],
            Compression::Zstd  => &[".zst", ".zstd"],
        }
    }

    pub fn is_compressed(self) -> bool {
        !matches!(self, Compression::None)
    }

    /// Level used when the caller does not pick one.
    pub fn default_level(self) -> i32 {
        match self {
            Compression::None  => 0,
            Compression::Gzip  => 6,
            Compression::Bzip2 => 6,
            Compression::Xz    => 6,
            Compression::Zstd  => 3,
        }
    }
}

// ── Codec trait ──────────────────────────────────────────────────────────────

pub trait Codec: Send + Sync {
    fn compression(&self) -> Compression;
    fn compress(&self, data: &[u8], level: i32) -> Result<Vec<u8>>;
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

// ── Built-in codec implementations ──────────────────────────────────────────

pub struct NoneCodec;
impl Codec for NoneCodec {
    fn compression(&self) -> Compression { Compression::None }
    fn compress(&self, data: &[u8], _: i32) -> Result<Vec<u8>> { Ok(data.to_vec()) }
    fn decompress(&self, data: &[u8])       -> Result<Vec<u8>> { Ok(data.to_vec()) }
}

pub struct GzipCodec;
impl Codec for GzipCodec {
    fn compression(&self) -> Compression { Compression::Gzip }
    fn compress(&self, data: &[u8], level: i32) -> Result<Vec<u8>> {
        let level = flate2::Compression::new(level.clamp(0, 9) as u32);
        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), level);
        encoder.write_all(data).map_err(|e| AnyfileError::Compression(e.to_string()))?;
        encoder.finish().map_err(|e| AnyfileError::Compression(e.to_string()))
    }
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        // MultiGzDecoder so concatenated gzip members decode like single ones.
        flate2::read::MultiGzDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|e| AnyfileError::Decompression(e.to_string()))?;
        Ok(out)
    }
}

pub struct Bzip2Codec;
impl Codec for Bzip2Codec {
    fn compression(&self) -> Compression { Compression::Bzip2 }
    fn compress(&self, data: &[u8], level: i32) -> Result<Vec<u8>> {
        let level = bzip2::Compression::new(level.clamp(1, 9) as u32);
        let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), level);
        encoder.write_all(data).map_err(|e| AnyfileError::Compression(e.to_string()))?;
        encoder.finish().map_err(|e| AnyfileError::Compression(e.to_string()))
    }
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        bzip2::read::BzDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|e| AnyfileError::Decompression(e.to_string()))?;
        Ok(out)
    }
}

pub struct XzCodec;
impl Codec for XzCodec {
    fn compression(&self) -> Compression { Compression::Xz }
    fn compress(&self, data: &[u8], _: i32) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        lzma_rs::xz_compress(&mut Cursor::new(data), &mut out)
            .map_err(|e| AnyfileError::Compression(e.to_string()))?;
        Ok(out)
    }
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        lzma_rs::xz_decompress(&mut Cursor::new(data), &mut out)
            .map_err(|e| AnyfileError::Decompression(e.to_string()))?;
        Ok(out)
    }
}

pub struct ZstdCodec;
impl Codec for ZstdCodec {
    fn compression(&self) -> Compression { Compression::Zstd }
    fn compress(&self, data: &[u8], level: i32) -> Result<Vec<u8>> {
        zstd::encode_all(data, level).map_err(|e| AnyfileError::Compression(e.to_string()))
    }
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        zstd::decode_all(data).map_err(|e| AnyfileError::Decompression(e.to_string()))
    }
}

// ── Factory ──────────────────────────────────────────────────────────────────

/// Resolve a compression discriminant to its codec.
pub fn get_codec(compression: Compression) -> Box<dyn Codec> {
    match compression {
        Compression::None  => Box::new(NoneCodec),
        Compression::Gzip  => Box::new(GzipCodec),
        Compression::Bzip2 => Box::new(Bzip2Codec),
        Compression::Xz    => Box::new(XzCodec),
        Compression::Zstd  => Box::new(ZstdCodec),
    }
}
