use chrono::NaiveDateTime;
use exif::{Exif, Field, In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Decode the EXIF block of an image file (JPEG, TIFF, HEIF, PNG, WebP).
pub fn read_exif(path: &Path) -> crate::Result<Exif> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    Ok(Reader::new().read_from_container(&mut reader)?)
}

/// `DateTime` from every IFD, thumbnail included.
pub fn generic_dates(exif: &Exif) -> Vec<NaiveDateTime> {
    dates_where(exif, |f| f.tag == Tag::DateTime)
}

/// `DateTime` and `DateTimeOriginal` of the primary image.
pub fn image_dates(exif: &Exif) -> Vec<NaiveDateTime> {
    dates_where(exif, |f| {
        f.ifd_num == In::PRIMARY && (f.tag == Tag::DateTime || f.tag == Tag::DateTimeOriginal)
    })
}

/// `DateTimeOriginal` from the Exif sub-IFD of any image.
pub fn sub_ifd_dates(exif: &Exif) -> Vec<NaiveDateTime> {
    dates_where(exif, |f| f.tag == Tag::DateTimeOriginal)
}

fn dates_where(exif: &Exif, pred: impl Fn(&Field) -> bool) -> Vec<NaiveDateTime> {
    exif.fields()
        .filter(|f| pred(f))
        .filter_map(|f| parse_exif_datetime(&f.display_value().to_string()))
        .collect()
}

/// EXIF datetimes have no timezone info - they are local time as-is.
/// Placeholders such as `0000:00:00 00:00:00` fail to parse and are dropped.
/// A bare date means midnight; a date followed by a malformed time is
/// rejected.
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let cleaned = s
        .trim_matches('"')
        .trim()
        .replace('-', ":")
        .replace('/', ":")
        .replace('\\', ":")
        .replace('.', ":");

    if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }

    chrono::NaiveDate::parse_from_str(&cleaned, "%Y:%m:%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
}
