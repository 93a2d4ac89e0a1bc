//! Capture-date extraction from embedded image metadata.
//!
//! Reading is best effort: any failure along the way (unreadable file, no EXIF
//! block, missing tag, malformed value) yields `None` and is only logged.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use exif::{Exif, In, Reader, Tag, Value};
use tracing::{debug, trace};

/// Layout of EXIF date/time strings, e.g. `2023:05:01 10:00:00`
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Source of capture timestamps for photo files
pub trait DateExtractor {
    fn extract(&self, path: &Path) -> Option<NaiveDateTime>;
}

/// Reads `DateTimeOriginal`, falling back to `DateTime`, from the file's EXIF block
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifDateExtractor;

impl DateExtractor for ExifDateExtractor {
    fn extract(&self, path: &Path) -> Option<NaiveDateTime> {
        let exif = match read_exif(path) {
            Ok(exif) => exif,
            Err(e) => {
                debug!(path = ?path, error = %e, "No readable EXIF data");
                return None;
            }
        };

        let original = ascii_field(&exif, Tag::DateTimeOriginal);
        let fallback = ascii_field(&exif, Tag::DateTime);

        let timestamp = pick_capture_date(original.as_deref(), fallback.as_deref());
        if timestamp.is_none() {
            debug!(path = ?path, "No usable capture date tag");
        }
        timestamp
    }
}

fn read_exif(path: &Path) -> Result<Exif, exif::Error> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    Reader::new().read_from_container(&mut reader)
}

fn ascii_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(parts) => {
            let raw = parts.first()?;
            let text = String::from_utf8_lossy(raw).to_string();
            trace!(tag = %tag, value = %text, "Read date tag");
            Some(text)
        }
        _ => None,
    }
}

/// Choose between the primary and fallback tag values and parse the result.
///
/// The first non-empty tag wins; a malformed primary value does not fall
/// through to the fallback.
pub fn pick_capture_date(original: Option<&str>, fallback: Option<&str>) -> Option<NaiveDateTime> {
    let chosen = [original, fallback]
        .into_iter()
        .flatten()
        .find(|value| !clean(value).is_empty())?;

    parse_exif_datetime(chosen)
}

pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(clean(value), EXIF_DATETIME_FORMAT).ok()
}

fn clean(value: &str) -> &str {
    value.trim_matches(|c: char| c == '\0' || c.is_whitespace())
}
