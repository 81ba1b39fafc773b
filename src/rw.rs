//! Read and write entry points.
//!
//! The generic pair [`read`]/[`write`] resolves both codec and format from
//! the file name and moves a dynamic [`Value`] through the matching handler:
//!
//! ```no_run
//! use serde_json::json;
//!
//! let value = json!({"name": "John", "age": 12});
//! anyfile::write(&value, "data.json.gz")?;
//! assert_eq!(anyfile::read("data.json.gz")?, value);
//! # Ok::<(), anyfile::AnyfileError>(())
//! ```
//!
//! Each format also has direct entry points (`read_json`, `write_toml`, …)
//! that skip format resolution — the caller already chose the format — but
//! still detect compression from the outer extension, so
//! `read_json("data.json.gz")` decompresses transparently.  The typed
//! variants are generic over serde:
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Config { workers: u32, host: String }
//!
//! let config: Config = anyfile::read_toml("service.toml")?;
//! anyfile::write_pickle(&config, "config.pkl.zst")?;
//! # Ok::<(), anyfile::AnyfileError>(())
//! ```
//!
//! Every call is synchronous and runs to completion or fails.  The only file
//! handle is scoped inside `fs::read`/`fs::write`, so no handle survives any
//! exit path, including decode failures.

use std::fs;
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::codec::{get_codec, Compression};
use crate::error::Result;
use crate::format::{EncodeOptions, StreamMode};
use crate::resolve::{detect_compression, resolve};

// ── Options ──────────────────────────────────────────────────────────────────

/// Configuration for the `read*` family.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Stream mode override.  `None` selects the per-format default (text
    /// for JSON/TOML/text, binary for pickle).
    pub mode: Option<StreamMode>,
}

/// Configuration for the `write*` family.
///
/// Writers always emit the encoder's native byte representation; the
/// text/binary distinction only affects reader-side validation, so there is
/// no mode override here.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Compression level.  `None` selects the codec default.  Ignored by
    /// the xz codec.
    pub level:  Option<i32>,
    /// Pretty-print structured text output (JSON, TOML).
    pub pretty: bool,
}

// ── Generic facade ───────────────────────────────────────────────────────────

/// Read a file, with codec and format both resolved from its name.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Value> {
    read_with(path, &ReadOptions::default())
}

pub fn read_with<P: AsRef<Path>>(path: P, opts: &ReadOptions) -> Result<Value> {
    let path = path.as_ref();
    let resolved = resolve(path)?;
    let mode = opts.mode.unwrap_or(resolved.handler.read_mode);
    let raw = read_raw(path, resolved.compression, mode)?;
    (resolved.handler.decode)(&raw)
}

/// Write a value to a file, with codec and format both resolved from its
/// name.
pub fn write<P: AsRef<Path>>(value: &Value, path: P) -> Result<()> {
    write_with(value, path, &WriteOptions::default())
}

pub fn write_with<P: AsRef<Path>>(value: &Value, path: P, opts: &WriteOptions) -> Result<()> {
    let path = path.as_ref();
    let resolved = resolve(path)?;
    let encoded = (resolved.handler.encode)(value, &EncodeOptions { pretty: opts.pretty })?;
    write_raw(path, &encoded, resolved.compression, opts.level)
}

// ── JSON ─────────────────────────────────────────────────────────────────────

pub fn read_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    read_json_with(path, &ReadOptions::default())
}

pub fn read_json_with<T, P>(path: P, opts: &ReadOptions) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mode = opts.mode.unwrap_or(StreamMode::Text);
    let raw = read_raw(path, detect_compression(path), mode)?;
    Ok(serde_json::from_slice(&raw)?)
}

pub fn write_json<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_json_with(value, path, &WriteOptions::default())
}

pub fn write_json_with<T, P>(value: &T, path: P, opts: &WriteOptions) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let encoded = if opts.pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    write_raw(path, &encoded, detect_compression(path), opts.level)
}

// ── Pickle ───────────────────────────────────────────────────────────────────

pub fn read_pickle<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    read_pickle_with(path, &ReadOptions::default())
}

pub fn read_pickle_with<T, P>(path: P, opts: &ReadOptions) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mode = opts.mode.unwrap_or(StreamMode::Binary);
    let raw = read_raw(path, detect_compression(path), mode)?;
    Ok(rmp_serde::from_slice(&raw)?)
}

pub fn write_pickle<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_pickle_with(value, path, &WriteOptions::default())
}

pub fn write_pickle_with<T, P>(value: &T, path: P, opts: &WriteOptions) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let encoded = rmp_serde::to_vec_named(value)?;
    write_raw(path, &encoded, detect_compression(path), opts.level)
}

// ── TOML ─────────────────────────────────────────────────────────────────────

pub fn read_toml<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    read_toml_with(path, &ReadOptions::default())
}

pub fn read_toml_with<T, P>(path: P, opts: &ReadOptions) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mode = opts.mode.unwrap_or(StreamMode::Text);
    let raw = read_raw(path, detect_compression(path), mode)?;
    // The TOML parser itself wants a string, whatever the mode says.
    let text = std::str::from_utf8(&raw)?;
    Ok(toml::from_str(text)?)
}

pub fn write_toml<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_toml_with(value, path, &WriteOptions::default())
}

pub fn write_toml_with<T, P>(value: &T, path: P, opts: &WriteOptions) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = if opts.pretty {
        toml::to_string_pretty(value)?
    } else {
        toml::to_string(value)?
    };
    write_raw(path, text.as_bytes(), detect_compression(path), opts.level)
}

// ── Text ─────────────────────────────────────────────────────────────────────

/// Read the entire content as one string.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    read_text_with(path, &ReadOptions::default())
}

pub fn read_text_with<P: AsRef<Path>>(path: P, opts: &ReadOptions) -> Result<String> {
    let path = path.as_ref();
    let mode = opts.mode.unwrap_or(StreamMode::Text);
    let raw = read_raw(path, detect_compression(path), mode)?;
    Ok(std::str::from_utf8(&raw)?.to_owned())
}

/// Write a string exactly as given, with no trailing transformation.
pub fn write_text<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    write_text_with(text, path, &WriteOptions::default())
}

pub fn write_text_with<P: AsRef<Path>>(text: &str, path: P, opts: &WriteOptions) -> Result<()> {
    let path = path.as_ref();
    write_raw(path, text.as_bytes(), detect_compression(path), opts.level)
}

/// Write each element verbatim, one after another.  Nothing is inserted
/// between elements — callers supply their own line terminators.
pub fn write_lines<I, S, P>(lines: I, path: P) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: AsRef<Path>,
{
    write_lines_with(lines, path, &WriteOptions::default())
}

pub fn write_lines_with<I, S, P>(lines: I, path: P, opts: &WriteOptions) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut out = Vec::new();
    for line in lines {
        out.extend_from_slice(line.as_ref().as_bytes());
    }
    write_raw(path, &out, detect_compression(path), opts.level)
}

// ── Internal plumbing ────────────────────────────────────────────────────────

/// Slurp and decompress a file.  `fs::read` scopes the only open handle, so
/// it is closed before decompression and decoding even start.
fn read_raw(path: &Path, compression: Compression, mode: StreamMode) -> Result<Vec<u8>> {
    let data = fs::read(path)?;
    let data = match compression {
        Compression::None => data,
        codec             => get_codec(codec).decompress(&data)?,
    };
    if mode == StreamMode::Text {
        std::str::from_utf8(&data)?;
    }
    Ok(data)
}

/// Compress and persist an encoded payload.
fn write_raw(path: &Path, data: &[u8], compression: Compression, level: Option<i32>) -> Result<()> {
    let level = level.unwrap_or_else(|| compression.default_level());
    debug!(
        "writing {} ({} bytes, {} compression)",
        path.display(),
        data.len(),
        compression.name()
    );
    let data = match compression {
        Compression::None => data.to_vec(),
        codec             => get_codec(codec).compress(data, level)?,
    };
    fs::write(path, data)?;
    Ok(())
}
