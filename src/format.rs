//! Format handler registry.
//!
//! A handler is a stateless (decode, encode) function pair bound to one
//! serialization format.  The registry is a `static` table keyed by the
//! format extension; it is built at compile time and never mutated, so it is
//! safe for concurrent read-only use from any number of callers.
//!
//! Every handler works on the whole decompressed buffer.  None of them
//! performs partial or streaming decode.

use serde_json::Value;

use crate::error::{AnyfileError, Result};

// ── Format discriminant ──────────────────────────────────────────────────────

/// Runtime format discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    /// Binary object graph, MessagePack on the wire.
    Pickle,
    Toml,
    Text,
}

impl Format {
    /// Resolve a format extension (leading dot included) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        handler_for_extension(ext).map(|h| h.format)
    }

    /// Human-readable name (for diagnostics only — never parsed).
    pub fn name(self) -> &'static str {
        match self {
            Format::Json   => "json",
            Format::Pickle => "pickle",
            Format::Toml   => "toml",
            Format::Text   => "text",
        }
    }

    /// Extensions this format claims, leading dot included.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Json   => &[".json"],
            Format::Pickle => &[".pickle", ".pkl"],
            Format::Toml   => &[".toml"],
            Format::Text   => &[".txt"],
        }
    }
}

// ── Stream mode ──────────────────────────────────────────────────────────────

/// How the decompressed byte stream is treated before decoding.
///
/// `Text` validates the buffer as UTF-8 up front; `Binary` hands it to the
/// decoder untouched.  Each format carries its own default; an explicit
/// [`ReadOptions`](crate::rw::ReadOptions) mode overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    Text,
    Binary,
}

// ── Encode options ───────────────────────────────────────────────────────────

/// Options forwarded to a handler's encode function.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Pretty-print structured text output (JSON, TOML).  Ignored by the
    /// binary and text handlers.
    pub pretty: bool,
}

// ── Handler ──────────────────────────────────────────────────────────────────

/// A (decode, encode) pair bound to one format.  Handlers hold no state.
#[derive(Debug)]
pub struct Handler {
    pub format:     Format,
    pub extensions: &'static [&'static str],
    /// Stream mode applied when the caller does not pick one.
    pub read_mode:  StreamMode,
    pub decode:     fn(&[u8]) -> Result<Value>,
    pub encode:     fn(&Value, &EncodeOptions) -> Result<Vec<u8>>,
}

/// The process-wide handler table.  Never mutated after compile time.
pub static FILE_HANDLERS: &[Handler] = &[
    Handler {
        format:     Format::Json,
        extensions: &[".json"],
        read_mode:  StreamMode::Text,
        decode:     decode_json,
        encode:     encode_json,
    },
    Handler {
        format:     Format::Pickle,
        extensions: &[".pickle", ".pkl"],
        read_mode:  StreamMode::Binary,
        decode:     decode_pickle,
        encode:     encode_pickle,
    },
    Handler {
        format:     Format::Toml,
        extensions: &[".toml"],
        read_mode:  StreamMode::Text,
        decode:     decode_toml,
        encode:     encode_toml,
    },
    Handler {
        format:     Format::Text,
        extensions: &[".txt"],
        read_mode:  StreamMode::Text,
        decode:     decode_text,
        encode:     encode_text,
    },
];

/// Look up the handler claiming `ext` (leading dot included).
pub fn handler_for_extension(ext: &str) -> Option<&'static Handler> {
    FILE_HANDLERS.iter().find(|h| h.extensions.contains(&ext))
}

// ── Per-format decode/encode ─────────────────────────────────────────────────

fn decode_json(data: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(data)?)
}

fn encode_json(value: &Value, opts: &EncodeOptions) -> Result<Vec<u8>> {
    if opts.pretty {
        Ok(serde_json::to_vec_pretty(value)?)
    } else {
        Ok(serde_json::to_vec(value)?)
    }
}

fn decode_pickle(data: &[u8]) -> Result<Value> {
    Ok(rmp_serde::from_slice(data)?)
}

fn encode_pickle(value: &Value, _: &EncodeOptions) -> Result<Vec<u8>> {
    // Named-field encoding so maps survive the round trip as maps.
    Ok(rmp_serde::to_vec_named(value)?)
}

fn decode_toml(data: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(data)?;
    Ok(toml::from_str(text)?)
}

fn encode_toml(value: &Value, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let text = if opts.pretty {
        toml::to_string_pretty(value)?
    } else {
        toml::to_string(value)?
    };
    Ok(text.into_bytes())
}

fn decode_text(data: &[u8]) -> Result<Value> {
    Ok(Value::String(std::str::from_utf8(data)?.to_owned()))
}

/// A string is written verbatim.  An array of strings is written element by
/// element with nothing inserted between them — callers supply their own line
/// terminators.
fn encode_text(value: &Value, _: &EncodeOptions) -> Result<Vec<u8>> {
    match value {
        Value::String(s) => Ok(s.clone().into_bytes()),
        Value::Array(items) => {
            let mut out = Vec::new();
            for item in items {
                match item {
                    Value::String(s) => out.extend_from_slice(s.as_bytes()),
                    _                => return Err(AnyfileError::InvalidTextPayload),
                }
            }
            Ok(out)
        }
        _ => Err(AnyfileError::InvalidTextPayload),
    }
}
