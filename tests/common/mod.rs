#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;

struct IfdEntry {
    tag: u16,
    kind: u16,
    count: u32,
    value: u32,
}

fn push_ifd(out: &mut Vec<u8>, entries: &[IfdEntry]) {
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        out.extend_from_slice(&entry.tag.to_le_bytes());
        out.extend_from_slice(&entry.kind.to_le_bytes());
        out.extend_from_slice(&entry.count.to_le_bytes());
        out.extend_from_slice(&entry.value.to_le_bytes());
    }
    // No next IFD
    out.extend_from_slice(&0u32.to_le_bytes());
}

fn ifd_len(entries: usize) -> u32 {
    2 + 12 * entries as u32 + 4
}

fn ascii_value(value: &str) -> Vec<u8> {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

/// Little-endian TIFF block with an optional `DateTime` in IFD0 and an
/// optional `DateTimeOriginal` in the Exif sub-IFD.
fn build_tiff(date_time: Option<&str>, original: Option<&str>) -> Vec<u8> {
    let ifd0_count = date_time.is_some() as usize + original.is_some() as usize;
    let mut data_offset = 8 + ifd_len(ifd0_count);

    let mut ifd0 = Vec::new();
    let mut data = Vec::new();

    if let Some(value) = date_time {
        let bytes = ascii_value(value);
        ifd0.push(IfdEntry {
            tag: TAG_DATE_TIME,
            kind: TYPE_ASCII,
            count: bytes.len() as u32,
            value: data_offset,
        });
        data_offset += bytes.len() as u32;
        data.extend(bytes);
    }

    if let Some(value) = original {
        let sub_ifd_offset = data_offset;
        let bytes = ascii_value(value);
        ifd0.push(IfdEntry {
            tag: TAG_EXIF_POINTER,
            kind: TYPE_LONG,
            count: 1,
            value: sub_ifd_offset,
        });

        let string_offset = sub_ifd_offset + ifd_len(1);
        push_ifd(
            &mut data,
            &[IfdEntry {
                tag: TAG_DATE_TIME_ORIGINAL,
                kind: TYPE_ASCII,
                count: bytes.len() as u32,
                value: string_offset,
            }],
        );
        data.extend(bytes);
    }

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    push_ifd(&mut tiff, &ifd0);
    tiff.extend(data);
    tiff
}

/// Minimal JPEG: SOI, an APP1 Exif segment, EOI
pub fn jpeg_with_exif(date_time: Option<&str>, original: Option<&str>) -> Vec<u8> {
    let tiff = build_tiff(date_time, original);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend(tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Write a JPEG whose `DateTimeOriginal` is `taken` (`YYYY:MM:DD HH:MM:SS`)
pub fn write_photo(dir: &Path, name: &str, taken: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, jpeg_with_exif(None, Some(taken))).unwrap();
    path
}

/// Write a file with an accepted extension but no metadata
pub fn write_undated(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"not really an image").unwrap();
    path
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

pub fn ledgers(dir: &Path) -> Vec<String> {
    file_names(dir)
        .into_iter()
        .filter(|name| name.starts_with(".photostamp-backup-"))
        .collect()
}
