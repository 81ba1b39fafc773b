pub mod codec;
pub mod error;
pub mod format;
pub mod resolve;
pub mod rw;

pub use codec::{get_codec, Codec, Compression};
pub use error::{AnyfileError, Result};
pub use format::{handler_for_extension, Format, Handler, StreamMode, FILE_HANDLERS};
pub use resolve::{resolve, Resolved};
pub use rw::{
    read, read_json, read_json_with, read_pickle, read_pickle_with, read_text, read_text_with,
    read_toml, read_toml_with, read_with, write, write_json, write_json_with, write_lines,
    write_lines_with, write_pickle, write_pickle_with, write_text, write_text_with, write_toml,
    write_toml_with, write_with, ReadOptions, WriteOptions,
};
pub use serde_json::Value;
