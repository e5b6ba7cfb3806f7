use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::localize;
use crate::Error;

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Last-modification times from `tIME` chunks, normalised to local time.
///
/// Files that are not PNG yield no dates. The chunk stream is walked up to
/// `IEND`; CRCs are not checked.
pub fn modification_times(path: &Path) -> crate::Result<Vec<NaiveDateTime>> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut signature = [0u8; 8];
    match reader.read_exact(&mut signature) {
        Ok(()) if signature == SIGNATURE => {}
        Ok(()) => return Ok(Vec::new()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    }

    let mut times = Vec::new();
    loop {
        let mut header = [0u8; 8];
        match reader.read_exact(&mut header) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }
        let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);

        match &header[4..] {
            b"tIME" => {
                if len != 7 {
                    return Err(Error::Png("tIME chunk must hold 7 bytes"));
                }
                let mut body = [0u8; 7];
                reader.read_exact(&mut body)?;
                times.extend(decode_time(&body));
                reader.seek_relative(4)?;
            }
            b"IEND" => break,
            _ => reader.seek_relative(i64::from(len) + 4)?,
        }
    }

    Ok(times)
}

// year (u16 BE), month, day, hour, minute, second; always UTC
fn decode_time(body: &[u8; 7]) -> Option<NaiveDateTime> {
    let year = i32::from(u16::from_be_bytes([body[0], body[1]]));
    let naive = NaiveDate::from_ymd_opt(year, body[2].into(), body[3].into())?
        .and_hms_opt(body[4].into(), body[5].into(), body[6].into())?;
    Some(localize(&Utc.from_utc_datetime(&naive)))
}
