//! Extension resolver — file name in, (codec, handler) out.
//!
//! The resolver is a pure function of the file name; directory components
//! never participate and no file is opened.  At most two suffixes matter:
//! the outer one may name a compression codec, the inner one names the
//! format (`data.json.gz` → gzip-wrapped JSON).
//!
//! Precedence is deliberate: when both suffixes are present and the outer
//! one is not a known codec, that is an unsupported compression method, not
//! a format named by the outer suffix with a spurious inner one.

use std::path::Path;

use log::debug;

use crate::codec::Compression;
use crate::error::{AnyfileError, Result};
use crate::format::{handler_for_extension, Handler};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Copy)]
pub struct Resolved {
    pub compression: Compression,
    pub handler:     &'static Handler,
}

/// Split a file name into stem and extension (leading dot included).
///
/// The extension is the suffix from the last dot.  A dot that only has more
/// dots before it never starts an extension, so `data` and `.bashrc` have
/// none while `data.` splits into `("data", ".")`.
pub(crate) fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if !name[..idx].is_empty() && !name[..idx].chars().all(|c| c == '.') => {
            (&name[..idx], &name[idx..])
        }
        _ => (name, ""),
    }
}

/// Determine which codec and which format handler apply to `path`.
///
/// # Errors
///
/// - [`AnyfileError::UnknownFileType`] when the name has no extension at all
///   (or is not valid UTF-8, which cannot be matched against the registry).
/// - [`AnyfileError::UnsupportedCompressionMethod`] when a secondary
///   extension is present but names no supported codec.
/// - [`AnyfileError::UnsupportedFileType`] when the format extension names
///   no registered handler.
pub fn resolve<P: AsRef<Path>>(path: P) -> Result<Resolved> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AnyfileError::unknown_file_type(path))?;

    let (stem, outer) = split_extension(name);
    if outer.is_empty() {
        return Err(AnyfileError::unknown_file_type(path));
    }

    let (_, inner) = split_extension(stem);

    // A single extension that is no codec must be the format extension.
    let (format_ext, compression) = if inner.is_empty() && Compression::from_extension(outer).is_none() {
        (outer, Compression::None)
    } else {
        match Compression::from_extension(outer) {
            Some(codec) => (inner, codec),
            None        => return Err(AnyfileError::unsupported_compression(outer)),
        }
    };

    let handler = handler_for_extension(format_ext)
        .ok_or_else(|| AnyfileError::unsupported_file_type(format_ext))?;

    debug!(
        "resolved {} as format={} compression={}",
        path.display(),
        handler.format.name(),
        compression.name()
    );

    Ok(Resolved { compression, handler })
}

/// Codec implied by the outer extension alone; unknown extensions mean plain,
/// uncompressed I/O.  Used by the per-format entry points, which skip format
/// resolution entirely.
pub(crate) fn detect_compression(path: &Path) -> Compression {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|name| Compression::from_extension(split_extension(name).1))
        .unwrap_or(Compression::None)
}
