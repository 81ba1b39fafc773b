//! Central error type.
//!
//! Resolution failures (`UnknownFileType`, `UnsupportedCompressionMethod`,
//! `UnsupportedFileType`) abort the operation before any file is opened.
//! Serializer and codec library failures propagate to the caller unchanged —
//! this crate adds no translation layer over them.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The error type for every fallible operation in this crate.
#[derive(Error, Debug)]
pub enum AnyfileError {
    /// The file name carries no extension at all, so resolution cannot even
    /// be attempted.
    #[error("failed to detect file type: {}", .filename.display())]
    UnknownFileType { filename: PathBuf },

    /// A secondary extension is present but names no supported codec.
    #[error("unsupported compression method: {ext}")]
    UnsupportedCompressionMethod { ext: String },

    /// The resolved format extension names no registered handler.
    #[error("unsupported file type: {ext}")]
    UnsupportedFileType { ext: String },

    #[error("compression error: {0}")]
    Compression(String),

    #[error("decompression error: {0}")]
    Decompression(String),

    /// Text files accept only a string or a sequence of strings.
    #[error("text payload must be a string or a sequence of strings")]
    InvalidTextPayload,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("pickle decode error: {0}")]
    PickleDecode(#[from] rmp_serde::decode::Error),

    #[error("pickle encode error: {0}")]
    PickleEncode(#[from] rmp_serde::encode::Error),

    #[error("stream is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Standard result type for this crate.
pub type Result<T> = std::result::Result<T, AnyfileError>;

impl AnyfileError {
    pub fn unknown_file_type(filename: impl Into<PathBuf>) -> Self {
        Self::UnknownFileType { filename: filename.into() }
    }

    pub fn unsupported_compression(ext: impl Into<String>) -> Self {
        Self::UnsupportedCompressionMethod { ext: ext.into() }
    }

    pub fn unsupported_file_type(ext: impl Into<String>) -> Self {
        Self::UnsupportedFileType { ext: ext.into() }
    }

    /// The offending extension, for the two `Unsupported*` variants.
    pub fn extension(&self) -> Option<&str> {
        match self {
            Self::UnsupportedCompressionMethod { ext } => Some(ext),
            Self::UnsupportedFileType { ext }          => Some(ext),
            _                                          => None,
        }
    }

    /// The offending file name, for `UnknownFileType`.
    pub fn filename(&self) -> Option<&Path> {
        match self {
            Self::UnknownFileType { filename } => Some(filename),
            _                                  => None,
        }
    }
}
