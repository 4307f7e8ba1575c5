use filecommander_core::{
    classify, format_size, EntryType, ErrorKind, FileEntry, FsError, IconKey, ServerConfig,
    SIZE_UNITS,
};
use std::time::SystemTime;

#[test]
fn test_format_size_negative_is_zero_bytes() {
    assert_eq!(format_size(-1), "0 Б");
    assert_eq!(format_size(i64::MIN), "0 Б");
}

#[test]
fn test_format_size_unit_ladder() {
    assert_eq!(format_size(1), "1 Б");
    assert_eq!(format_size(1023), "1023 Б");
    assert_eq!(format_size(1024), "1 КБ");
    assert_eq!(format_size(1024 * 1024), "1 МБ");
    assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5 ГБ");
    assert_eq!(format_size(1024_i64.pow(4)), "1 ТБ");

    // Terabyte is the largest unit, so the quantity keeps growing.
    assert_eq!(format_size(1024_i64.pow(5)), "1024 ТБ");
}

#[test]
fn test_format_size_picks_largest_unit() {
    // Every exact power boundary switches unit, and the value just below stays in the smaller one.
    for (index, unit) in SIZE_UNITS.iter().enumerate().skip(1) {
        let boundary = 1024_i64.pow(index as u32);
        assert_eq!(format_size(boundary), format!("1 {unit}"));

        let below = format_size(boundary - 1);
        assert!(
            below.ends_with(&format!(" {}", SIZE_UNITS[index - 1])),
            "{below} should use {}",
            SIZE_UNITS[index - 1]
        );
    }
}

#[test]
fn test_format_size_numeric_part_below_1024() {
    for bytes in [1500_i64, 3_000_000, 7_500_000_000, 123_456_789_012] {
        let formatted = format_size(bytes);
        let (number, _unit) = formatted.split_once(' ').unwrap();
        let value: f64 = number.parse().unwrap();
        assert!((1.0..1024.0).contains(&value), "{formatted}");
    }
}

#[test]
fn test_classify_is_case_insensitive() {
    assert_eq!(classify(".JPG"), classify(".jpg"));
    assert_eq!(classify(".Mp4"), EntryType::Video);
    assert_eq!(classify(".LOG"), EntryType::Text);
}

#[test]
fn test_classify_unknown_is_file() {
    assert_eq!(classify(".xyz"), EntryType::File);
    assert_eq!(classify(""), EntryType::File);
    assert_eq!(IconKey::for_type(EntryType::File), IconKey::File);
}

#[test]
fn test_file_entry_json_shape() {
    let entry = FileEntry::new_file("song.MP3", "/music/song.MP3", 3 * 1024 * 1024, SystemTime::now());
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["name"], "song.MP3");
    assert_eq!(json["fullPath"], "/music/song.MP3");
    assert_eq!(json["isDirectory"], false);
    assert_eq!(json["sizeBytes"], 3 * 1024 * 1024);
    assert_eq!(json["formattedSize"], "3 МБ");
    assert_eq!(json["type"], "audio");
    assert_eq!(json["iconKey"], "file-audio");
    assert!(json["lastModified"].is_string());
}

#[test]
fn test_directory_entry_json_shape() {
    let entry = FileEntry::new_directory("docs", "/home/docs", SystemTime::now());
    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["isDirectory"], true);
    assert!(json["sizeBytes"].is_null());
    assert_eq!(json["formattedSize"], "");
    assert_eq!(json["type"], "directory");
    assert_eq!(json["iconKey"], "folder");
}

#[test]
fn test_error_kinds() {
    assert_eq!(FsError::invalid("empty").kind(), ErrorKind::InvalidArgument);
    assert_eq!(FsError::Cancelled.kind(), ErrorKind::Cancelled);

    let wrapped = FsError::NotFound {
        path: "/gone".into(),
    }
    .for_source("/src");
    assert_eq!(wrapped.kind(), ErrorKind::Io);

    let wrapped = FsError::AlreadyExists {
        path: "/dest/a.txt".into(),
    }
    .for_source("/src/a.txt");
    assert_eq!(wrapped.kind(), ErrorKind::AlreadyExists);
}

#[test]
fn test_config_load_from_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "host = \"0.0.0.0\"\nport = 8181\nstatic_dir = \"/srv/ui\"\n").unwrap();

    let config = ServerConfig::load(&path).unwrap();
    assert_eq!(config.port, 8181);
    assert_eq!(config.host.to_string(), "0.0.0.0");
    assert_eq!(config.static_dir.as_deref(), Some(std::path::Path::new("/srv/ui")));

    let explicit = ServerConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(explicit, config);
}

#[test]
fn test_config_missing_file_is_error() {
    let temp = tempfile::TempDir::new().unwrap();
    let result = ServerConfig::load(&temp.path().join("absent.toml"));
    assert!(result.is_err());
}
