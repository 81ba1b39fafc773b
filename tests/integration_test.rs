use anyfile::rw::{ReadOptions, WriteOptions};
use anyfile::{AnyfileError, StreamMode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn sample() -> Value {
    json!({"name": "John", "age": 12})
}

#[test]
fn test_json_roundtrip_every_codec() {
    let dir = tempdir().unwrap();

    for name in [
        "data.json",
        "data.json.gz",
        "data.json.bz2",
        "data.json.xz",
        "data.json.zst",
    ] {
        let path = dir.path().join(name);
        anyfile::write(&sample(), &path).unwrap();
        assert_eq!(anyfile::read(&path).unwrap(), sample(), "roundtrip via {name}");
    }
}

#[test]
fn test_empty_mapping_roundtrip() {
    let dir = tempdir().unwrap();

    for name in ["empty.json", "empty.toml", "empty.pkl", "empty.json.gz"] {
        let path = dir.path().join(name);
        anyfile::write(&json!({}), &path).unwrap();
        assert_eq!(anyfile::read(&path).unwrap(), json!({}), "roundtrip via {name}");
    }
}

#[test]
fn test_pickle_roundtrip_typed() {
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    struct Save {
        name:  String,
        score: u32,
        tags:  Vec<String>,
    }

    let save = Save {
        name:  "slot-1".to_owned(),
        score: 9001,
        tags:  vec!["auto".to_owned(), "cloud".to_owned()],
    };

    let dir = tempdir().unwrap();
    for name in ["save.pkl", "save.pickle.gz", "save.pkl.bz2", "save.pkl.xz", "save.pkl.zst"] {
        let path = dir.path().join(name);
        anyfile::write_pickle(&save, &path).unwrap();
        let back: Save = anyfile::read_pickle(&path).unwrap();
        assert_eq!(back, save, "roundtrip via {name}");
    }
}

#[test]
fn test_toml_roundtrip_typed_and_dynamic() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Config {
        workers: u32,
        host:    String,
    }

    let dir = tempdir().unwrap();

    let config = Config { workers: 4, host: "127.0.0.1".to_owned() };
    let path = dir.path().join("service.toml");
    anyfile::write_toml(&config, &path).unwrap();
    let back: Config = anyfile::read_toml(&path).unwrap();
    assert_eq!(back, config);

    let value = json!({"server": {"host": "0.0.0.0", "port": 8080}});
    for name in ["s.toml", "s.toml.gz", "s.toml.bz2", "s.toml.xz", "s.toml.zst"] {
        let path = dir.path().join(name);
        anyfile::write(&value, &path).unwrap();
        assert_eq!(anyfile::read(&path).unwrap(), value, "roundtrip via {name}");
    }
}

#[test]
fn test_facade_and_direct_entry_points_agree() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json.gz");

    anyfile::write_json(&sample(), &path).unwrap();
    assert_eq!(anyfile::read(&path).unwrap(), sample());

    anyfile::write(&sample(), &path).unwrap();
    let back: Value = anyfile::read_json(&path).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn test_text_whole_string_verbatim() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("note.txt");

    let content = "no trailing newline";
    anyfile::write_text(content, &path).unwrap();
    assert_eq!(anyfile::read_text(&path).unwrap(), content);
    // Nothing appended, nothing transformed.
    assert_eq!(fs::read(&path).unwrap(), content.as_bytes());
}

#[test]
fn test_text_lines_written_consecutively() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lines.txt");

    // Callers supply their own line terminators.
    anyfile::write_lines(["alpha\n", "beta\n", "gamma"], &path).unwrap();
    assert_eq!(anyfile::read_text(&path).unwrap(), "alpha\nbeta\ngamma");

    anyfile::write_lines(["x", "y"], &path).unwrap();
    assert_eq!(anyfile::read_text(&path).unwrap(), "xy");
}

#[test]
fn test_text_through_dynamic_facade() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lines.txt.gz");

    anyfile::write(&json!(["line1\n", "line2\n"]), &path).unwrap();
    assert_eq!(anyfile::read(&path).unwrap(), json!("line1\nline2\n"));

    match anyfile::write(&json!(42), dir.path().join("bad.txt")) {
        Err(AnyfileError::InvalidTextPayload) => {}
        other => panic!("expected InvalidTextPayload, got {other:?}"),
    }
}

#[test]
fn test_unicode_text_survives_compression() {
    let dir = tempdir().unwrap();

    let content = "héllo wörld — ≠ ascii\n日本語\n";
    for name in ["u.txt", "u.txt.gz", "u.txt.bz2", "u.txt.xz", "u.txt.zst"] {
        let path = dir.path().join(name);
        anyfile::write_text(content, &path).unwrap();
        assert_eq!(anyfile::read_text(&path).unwrap(), content, "roundtrip via {name}");
    }
}

#[test]
fn test_compressed_output_carries_codec_magic() {
    let dir = tempdir().unwrap();

    let cases: [(&str, &[u8]); 4] = [
        ("m.json.gz",  &[0x1f, 0x8b]),
        ("m.json.bz2", b"BZh"),
        ("m.json.xz",  &[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00]),
        ("m.json.zst", &[0x28, 0xb5, 0x2f, 0xfd]),
    ];
    for (name, magic) in cases {
        let path = dir.path().join(name);
        anyfile::write(&sample(), &path).unwrap();
        let on_disk = fs::read(&path).unwrap();
        assert!(on_disk.starts_with(magic), "{name} should start with its codec magic");
    }
}

#[test]
fn test_stream_mode_override() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.pkl");

    anyfile::write_pickle(&sample(), &path).unwrap();

    // Binary is the pickle default; forcing text mode runs the UTF-8 check
    // against MessagePack bytes and fails before the decoder sees them.
    let forced: Result<Value, _> =
        anyfile::read_pickle_with(&path, &ReadOptions { mode: Some(StreamMode::Text) });
    match forced {
        Err(AnyfileError::Utf8(_)) => {}
        other => panic!("expected Utf8 error, got {other:?}"),
    }

    // The override still flows through the same codec/format dispatch: a
    // binary-mode JSON read bypasses the text default and succeeds.
    let path = dir.path().join("data.json.gz");
    anyfile::write(&sample(), &path).unwrap();
    let value =
        anyfile::read_with(&path, &ReadOptions { mode: Some(StreamMode::Binary) }).unwrap();
    assert_eq!(value, sample());
}

#[test]
fn test_write_options() {
    let dir = tempdir().unwrap();

    let compact = dir.path().join("compact.json");
    let pretty = dir.path().join("pretty.json");
    anyfile::write(&sample(), &compact).unwrap();
    anyfile::write_with(&sample(), &pretty, &WriteOptions { pretty: true, ..Default::default() })
        .unwrap();
    assert!(!fs::read(&compact).unwrap().contains(&b'\n'));
    assert!(fs::read(&pretty).unwrap().contains(&b'\n'));
    assert_eq!(anyfile::read(&pretty).unwrap(), sample());

    // Any accepted level must still produce a readable file.
    for level in [1, 9] {
        let path = dir.path().join(format!("l{level}.json.gz"));
        anyfile::write_with(&sample(), &path, &WriteOptions { level: Some(level), pretty: false })
            .unwrap();
        assert_eq!(anyfile::read(&path).unwrap(), sample());
    }
}

#[test]
fn test_malformed_payload_propagates_library_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");

    // Direct entry points skip format resolution, so this writes the broken
    // payload verbatim.
    anyfile::write_text("{not json", &path).unwrap();
    match anyfile::read(&path) {
        Err(AnyfileError::Json(_)) => {}
        other => panic!("expected Json error, got {other:?}"),
    }

    let path = dir.path().join("bad.toml");
    anyfile::write_text("= broken", &path).unwrap();
    match anyfile::read(&path) {
        Err(AnyfileError::TomlDecode(_)) => {}
        other => panic!("expected TomlDecode error, got {other:?}"),
    }
}

#[test]
fn test_truncated_stream_fails_decompression() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.json.gz");

    anyfile::write(&sample(), &path).unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    match anyfile::read(&path) {
        Err(AnyfileError::Decompression(_)) | Err(AnyfileError::Json(_)) => {}
        other => panic!("expected a decode failure, got {other:?}"),
    }
}

#[test]
fn test_resolution_failure_precedes_io() {
    // The file does not exist; a resolution error proves no open was
    // attempted.
    match anyfile::read("missing.json.rar") {
        Err(AnyfileError::UnsupportedCompressionMethod { ext }) => assert_eq!(ext, ".rar"),
        other => panic!("expected UnsupportedCompressionMethod, got {other:?}"),
    }
    match anyfile::write(&sample(), "missing.unknowntype") {
        Err(AnyfileError::UnsupportedFileType { ext }) => assert_eq!(ext, ".unknowntype"),
        other => panic!("expected UnsupportedFileType, got {other:?}"),
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_no_handle_survives_failed_reads() {
    fn open_fds() -> usize {
        fs::read_dir("/proc/self/fd").unwrap().count()
    }

    let dir = tempdir().unwrap();
    let truncated = dir.path().join("data.json.gz");
    anyfile::write(&sample(), &truncated).unwrap();
    let bytes = fs::read(&truncated).unwrap();
    fs::write(&truncated, &bytes[..bytes.len() / 2]).unwrap();

    let broken = dir.path().join("bad.json");
    anyfile::write_text("{not json", &broken).unwrap();

    let baseline = open_fds();
    for _ in 0..8 {
        let _ = anyfile::read(&truncated);
        let _ = anyfile::read(&broken);
        let _ = anyfile::read(dir.path().join("missing.json"));
    }
    assert_eq!(open_fds(), baseline);
}
