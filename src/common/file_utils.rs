use crate::common::timestamp_utils;
use crate::errors::AppError;
use chrono::{DateTime, TimeZone};
use log::debug;
use regex::Regex;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace pattern"));

// Keeps letters, numbers (any script, including superscripts and fractions),
// `_`, `-` and `.`. Combining marks and other connector punctuation are dropped.
static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_.-]").expect("Invalid disallowed-character pattern"));

// Only this exact shape is collapsed; "--" or "___" on their own are kept.
static UNDERSCORE_HYPHEN_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+-+_+").expect("Invalid underscore-hyphen pattern"));

/// Clean a string so it can be used as a single path segment.
///
/// Whitespace is trimmed and inner runs become `_`, everything except word
/// characters, `-` and `.` is dropped, and `_-_` style runs collapse to `__`.
///
/// # Errors
/// `AppError::SuspiciousFileOperation` if the cleaned value is empty, `.` or `..`.
pub fn get_valid_filename(name: impl Display) -> Result<String, AppError> {
    let original = name.to_string();
    let underscored = WHITESPACE_RUN.replace_all(original.trim(), "_");
    let stripped = DISALLOWED_CHARS.replace_all(&underscored, "");
    let cleaned = UNDERSCORE_HYPHEN_UNDERSCORE.replace_all(&stripped, "__");

    if matches!(&*cleaned, "" | "." | "..") {
        debug!("Rejecting suspicious file name derived from '{}'", original);
        return Err(AppError::SuspiciousFileOperation { name: original });
    }
    Ok(cleaned.into_owned())
}

pub fn generate_timestamped_filename<Tz>(
    base_name: &str,         // e.g., run or device name
    timestamp: &DateTime<Tz>,
    timestamp_format: &str,  // strftime, e.g., "%Y%m%d_%H%M%S"
    extension: &str,         // e.g., "csv", "json"
) -> Result<String, AppError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let base = get_valid_filename(base_name)?;
    let stamp = get_valid_filename(timestamp_utils::format_timestamp(timestamp, timestamp_format))?;
    let ext = get_valid_filename(extension.trim_start_matches('.'))?;
    Ok(format!("{}_{}.{}", base, stamp, ext))
}

// Directory that sanitized names get created in; made on demand.
pub fn ensure_output_directory(dir_path: &Path) -> Result<PathBuf, AppError> {
    if dir_path.is_dir() {
        return Ok(dir_path.to_path_buf());
    }
    if dir_path.exists() {
        return Err(AppError::Io(format!("'{}' exists but is not a directory", dir_path.display())));
    }
    debug!("Creating output directory '{}'", dir_path.display());
    std::fs::create_dir_all(dir_path)?;
    Ok(dir_path.to_path_buf())
}
