#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use filetime::FileTime;

pub fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

pub fn local_secs(date: NaiveDateTime) -> i64 {
    date.and_local_timezone(Local).earliest().unwrap().timestamp()
}

pub fn mtime(path: &Path) -> i64 {
    FileTime::from_last_modification_time(&fs::metadata(path).unwrap()).unix_seconds()
}

pub fn write_with_mtime(path: &Path, bytes: &[u8], date: NaiveDateTime) -> PathBuf {
    fs::write(path, bytes).unwrap();
    media_age::reconcile::set_mtime(path, date).unwrap();
    path.to_path_buf()
}

/// Minimal big-endian JPEG whose Exif sub-IFD holds one `DateTimeOriginal`.
pub fn jpeg_with_date_time_original(value: &str) -> Vec<u8> {
    assert_eq!(value.len(), 19, "EXIF dates are YYYY:MM:DD HH:MM:SS");

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());

    // IFD0 at 8: ExifIFDPointer -> 26
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x8769u16.to_be_bytes());
    tiff.extend_from_slice(&4u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&26u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());

    // Exif IFD at 26: DateTimeOriginal -> 44
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x9003u16.to_be_bytes());
    tiff.extend_from_slice(&2u16.to_be_bytes());
    tiff.extend_from_slice(&20u32.to_be_bytes());
    tiff.extend_from_slice(&44u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());

    tiff.extend_from_slice(value.as_bytes());
    tiff.push(0);
    assert_eq!(tiff.len(), 64);

    let mut app1 = b"Exif\x00\x00".to_vec();
    app1.extend_from_slice(&tiff);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    jpeg.extend_from_slice(&app1);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Seconds since 1904-01-01 UTC for a UTC date, as stored in `mvhd`.
pub fn mac_secs(utc: NaiveDateTime) -> u32 {
    (utc.and_utc().timestamp() + 2_082_844_800) as u32
}

fn atom(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = ((8 + body.len()) as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(body);
    out
}

/// Version 0, no flags.
fn full_atom(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut versioned = 0u32.to_be_bytes().to_vec();
    versioned.extend_from_slice(body);
    atom(kind, &versioned)
}

const IDENTITY: [u32; 9] = [0x0001_0000, 0, 0, 0, 0x0001_0000, 0, 0, 0, 0x4000_0000];

fn ftyp() -> Vec<u8> {
    let mut body = b"isom".to_vec();
    body.extend_from_slice(&0x200u32.to_be_bytes());
    body.extend_from_slice(b"isom");
    atom(b"ftyp", &body)
}

fn mvhd(creation_time: u32) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&creation_time.to_be_bytes());
    body.extend_from_slice(&creation_time.to_be_bytes()); // modification
    body.extend_from_slice(&1000u32.to_be_bytes()); // timescale
    body.extend_from_slice(&0u32.to_be_bytes()); // duration
    body.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // rate
    body.extend_from_slice(&0x0100u16.to_be_bytes()); // volume
    body.extend_from_slice(&[0; 10]);
    for m in IDENTITY {
        body.extend_from_slice(&m.to_be_bytes());
    }
    body.extend_from_slice(&[0; 24]);
    body.extend_from_slice(&2u32.to_be_bytes()); // next track id
    let mvhd = full_atom(b"mvhd", &body);
    assert_eq!(mvhd.len(), 108);
    mvhd
}

/// One empty video track whose `mdhd` carries `creation_time`.
fn trak(creation_time: u32) -> Vec<u8> {
    let mut tkhd = Vec::new();
    tkhd.extend_from_slice(&creation_time.to_be_bytes());
    tkhd.extend_from_slice(&creation_time.to_be_bytes());
    tkhd.extend_from_slice(&1u32.to_be_bytes()); // track id
    tkhd.extend_from_slice(&[0; 4]);
    tkhd.extend_from_slice(&0u32.to_be_bytes()); // duration
    tkhd.extend_from_slice(&[0; 16]); // reserved, layer, group, volume, reserved
    for m in IDENTITY {
        tkhd.extend_from_slice(&m.to_be_bytes());
    }
    tkhd.extend_from_slice(&[0; 8]); // width, height
    let tkhd = full_atom(b"tkhd", &tkhd);
    assert_eq!(tkhd.len(), 92);

    let mut mdhd = Vec::new();
    mdhd.extend_from_slice(&creation_time.to_be_bytes());
    mdhd.extend_from_slice(&creation_time.to_be_bytes());
    mdhd.extend_from_slice(&1000u32.to_be_bytes()); // timescale
    mdhd.extend_from_slice(&0u32.to_be_bytes()); // duration
    mdhd.extend_from_slice(&0x55C4u16.to_be_bytes()); // "und"
    mdhd.extend_from_slice(&[0; 2]);
    let mdhd = full_atom(b"mdhd", &mdhd);
    assert_eq!(mdhd.len(), 32);

    let mut hdlr = [0u8; 4].to_vec();
    hdlr.extend_from_slice(b"vide");
    hdlr.extend_from_slice(&[0; 12]);
    hdlr.push(0); // empty name
    let hdlr = full_atom(b"hdlr", &hdlr);

    let dinf = atom(b"dinf", &full_atom(b"dref", &0u32.to_be_bytes()));
    let stbl = [
        full_atom(b"stsd", &[0, 0, 0, 0, 0, 0, 0, 8, b'f', b'r', b'e', b'e']),
        full_atom(b"stts", &0u32.to_be_bytes()),
        full_atom(b"stsc", &0u32.to_be_bytes()),
        full_atom(b"stsz", &[0; 8]),
        full_atom(b"stco", &0u32.to_be_bytes()),
    ]
    .concat();
    let minf = atom(b"minf", &[dinf, atom(b"stbl", &stbl)].concat());
    let mdia = atom(b"mdia", &[mdhd, hdlr, minf].concat());
    atom(b"trak", &[tkhd, mdia].concat())
}

/// `ftyp` + `moov` with a version 0 `mvhd` and no tracks.
pub fn mp4_with_creation_time(creation_time: u32) -> Vec<u8> {
    [ftyp(), atom(b"moov", &mvhd(creation_time))].concat()
}

/// `ftyp` + `moov` with an `mvhd` and one track with its own `mdhd` time.
pub fn mp4_with_track(movie_time: u32, media_time: u32) -> Vec<u8> {
    let moov = atom(b"moov", &[mvhd(movie_time), trak(media_time)].concat());
    [ftyp(), moov].concat()
}

/// Big-endian JPEG with `DateTime` in IFD0 and `DateTimeOriginal` in the
/// Exif sub-IFD.
pub fn jpeg_with_dates(date_time: &str, date_time_original: &str) -> Vec<u8> {
    assert_eq!(date_time.len(), 19);
    assert_eq!(date_time_original.len(), 19);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());

    // IFD0 at 8: DateTime -> 76, ExifIFDPointer -> 38
    tiff.extend_from_slice(&2u16.to_be_bytes());
    tiff.extend_from_slice(&0x0132u16.to_be_bytes());
    tiff.extend_from_slice(&2u16.to_be_bytes());
    tiff.extend_from_slice(&20u32.to_be_bytes());
    tiff.extend_from_slice(&76u32.to_be_bytes());
    tiff.extend_from_slice(&0x8769u16.to_be_bytes());
    tiff.extend_from_slice(&4u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&38u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());
    assert_eq!(tiff.len(), 38);

    // Exif IFD at 38: DateTimeOriginal -> 56
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x9003u16.to_be_bytes());
    tiff.extend_from_slice(&2u16.to_be_bytes());
    tiff.extend_from_slice(&20u32.to_be_bytes());
    tiff.extend_from_slice(&56u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());
    assert_eq!(tiff.len(), 56);

    tiff.extend_from_slice(date_time_original.as_bytes());
    tiff.push(0);
    tiff.extend_from_slice(date_time.as_bytes());
    tiff.push(0);
    assert_eq!(tiff.len(), 96);

    let mut app1 = b"Exif\x00\x00".to_vec();
    app1.extend_from_slice(&tiff);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    jpeg.extend_from_slice(&app1);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

fn png_chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&[0; 4]); // CRC, not checked
    out
}

/// 1x1 PNG whose `tIME` chunk holds `utc`.
pub fn png_with_time(utc: NaiveDateTime) -> Vec<u8> {
    let mut ihdr = 1u32.to_be_bytes().to_vec();
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&[8, 0, 0, 0, 0]);

    let mut time = (utc.year() as u16).to_be_bytes().to_vec();
    time.extend_from_slice(&[
        utc.month() as u8,
        utc.day() as u8,
        utc.hour() as u8,
        utc.minute() as u8,
        utc.second() as u8,
    ]);

    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend(png_chunk(b"IHDR", &ihdr));
    png.extend(png_chunk(b"tIME", &time));
    png.extend(png_chunk(b"IDAT", &[0x78, 0x9C, 0x63, 0x00, 0x00, 0x00, 0x02, 0x00, 0x01]));
    png.extend(png_chunk(b"IEND", &[]));
    png
}
