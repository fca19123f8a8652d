use std::io::Write;

use indoc::indoc;
use tempfile::NamedTempFile;

use crate::engine::core::column::options::{CompressionKind, ZeroValueMode};
use crate::shared::config::{Settings, load_settings_from};

fn write_toml(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_cover_every_section() {
    let settings = Settings::default();
    assert_eq!(settings.column.compression, CompressionKind::Lz4);
    assert!(settings.column.store_range_stats);
    assert_eq!(settings.sketch.precision, 14);
    assert_eq!(settings.logging.stdout_level, "info");
    assert!(!settings.logging.file_enabled);
}

#[test]
fn file_values_override_defaults() {
    let file = write_toml(indoc! {r#"
        [column]
        page_size_hint = 4096
        compression = "zstd"
        compression_level = 9
        zero_values = "byte_array_only"

        [sketch]
        precision = 12
    "#});

    let settings = load_settings_from(file.path()).expect("load");
    assert_eq!(settings.column.page_size_hint, 4096);
    assert_eq!(settings.column.compression, CompressionKind::Zstd);
    assert_eq!(settings.column.compression_level, 9);
    assert_eq!(settings.column.zero_values, ZeroValueMode::ByteArrayOnly);
    assert_eq!(settings.sketch.precision, 12);
    // Untouched sections keep their defaults.
    assert!(settings.column.store_cardinality_stats);
    assert_eq!(settings.logging, Settings::default().logging);
}

#[test]
fn unknown_enum_value_is_an_error() {
    let file = write_toml(indoc! {r#"
        [column]
        compression = "brotli"
    "#});
    assert!(load_settings_from(file.path()).is_err());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_settings_from(dir.path().join("nope.toml")).is_err());
}
