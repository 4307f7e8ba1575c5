//! Extension classification and size formatting.

use crate::entry::EntryType;

/// Size unit labels, smallest first.
pub const SIZE_UNITS: [&str; 5] = ["Б", "КБ", "МБ", "ГБ", "ТБ"];

/// Classify a file by its extension.
///
/// The leading dot is optional and matching is case-insensitive.
/// Unknown or empty extensions classify as [`EntryType::File`].
pub fn classify(extension: &str) -> EntryType {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    if ext.trim().is_empty() {
        return EntryType::File;
    }

    match ext.to_lowercase().as_str() {
        "txt" | "md" | "log" => EntryType::Text,
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" => EntryType::Image,
        "mp3" | "wav" | "flac" | "aac" => EntryType::Audio,
        "mp4" | "avi" | "mkv" | "mov" | "wmv" => EntryType::Video,
        "exe" | "bat" | "cmd" => EntryType::Binary,
        _ => EntryType::File,
    }
}

/// Extension of a file name, including the leading dot.
///
/// Everything from the last `.` onwards, so `".bashrc"` is its own extension.
/// Names without a dot or ending in one have an empty extension.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}

/// Format a byte count as a human-readable string.
///
/// Negative counts render as zero bytes. Output never depends on the
/// process locale: the decimal separator is always `.`.
pub fn format_size(bytes: i64) -> String {
    if bytes < 0 {
        return format!("0 {}", SIZE_UNITS[0]);
    }

    let mut len = bytes as f64;
    let mut order = 0;
    while len >= 1024.0 && order < SIZE_UNITS.len() - 1 {
        order += 1;
        len /= 1024.0;
    }

    // Half away from zero, at most two fractional digits.
    let rounded = (len * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');

    format!("{text} {}", SIZE_UNITS[order])
}
