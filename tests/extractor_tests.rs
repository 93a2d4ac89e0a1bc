mod common;

use std::fs;

use chrono::NaiveDate;
use photostamp::{preview, DateExtractor, ExifDateExtractor, NoProgress, RenameConfig, Session};
use tempfile::tempdir;

use common::{jpeg_with_exif, write_photo, write_undated};

#[test]
fn test_reads_date_time_original() {
    let dir = tempdir().unwrap();
    let path = write_photo(dir.path(), "a.jpg", "2023:05:01 10:00:00");

    let expected = NaiveDate::from_ymd_opt(2023, 5, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    assert_eq!(ExifDateExtractor.extract(&path), Some(expected));
}

#[test]
fn test_prefers_original_over_modification_date() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.jpg");
    fs::write(
        &path,
        jpeg_with_exif(Some("2024:02:02 02:02:02"), Some("2020:01:01 01:01:01")),
    )
    .unwrap();

    let taken = ExifDateExtractor.extract(&path).unwrap();
    assert_eq!(taken.format("%Y").to_string(), "2020");
}

#[test]
fn test_falls_back_to_date_time() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.jpg");
    fs::write(&path, jpeg_with_exif(Some("2024:02:02 02:02:02"), None)).unwrap();

    let taken = ExifDateExtractor.extract(&path).unwrap();
    assert_eq!(taken.format("%Y-%m-%d").to_string(), "2024-02-02");
}

#[test]
fn test_no_tags_yields_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.jpg");
    fs::write(&path, jpeg_with_exif(None, None)).unwrap();

    assert_eq!(ExifDateExtractor.extract(&path), None);
}

#[test]
fn test_session_preview_with_real_metadata() {
    let dir = tempdir().unwrap();
    write_photo(dir.path(), "a.jpg", "2023:05:01 10:00:00");
    write_photo(dir.path(), "b.jpg", "2023:05:01 10:00:00");
    write_undated(dir.path(), "c.png");

    let session =
        Session::scan(dir.path(), RenameConfig::default(), &ExifDateExtractor).unwrap();
    let plan = preview(&session, &mut NoProgress);

    let names: Vec<_> = plan
        .renames()
        .map(|entry| entry.destination_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["2023-05-01_10-00-00.jpg", "2023-05-01_10-00-00_1.jpg"]
    );
    assert_eq!(plan.skipped, vec!["c.png".to_string()]);
}

#[test]
fn test_hidden_photo_is_planned() {
    let dir = tempdir().unwrap();
    write_photo(dir.path(), ".beach.jpg", "2023:05:01 10:00:00");
    write_photo(dir.path(), "a.jpg", "2023:05:01 10:00:00");

    let session =
        Session::scan(dir.path(), RenameConfig::default(), &ExifDateExtractor).unwrap();
    let plan = preview(&session, &mut NoProgress);

    let pairs: Vec<_> = plan
        .renames()
        .map(|entry| (entry.source_name.as_str(), entry.destination_name.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (".beach.jpg", "2023-05-01_10-00-00.jpg"),
            ("a.jpg", "2023-05-01_10-00-00_1.jpg"),
        ]
    );
}
