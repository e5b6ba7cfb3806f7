use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use super::localize;

/// Creation times stored in the `moov` atom of an MP4/QuickTime container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerTimes {
    /// `mvhd` creation time
    pub movie: Option<NaiveDateTime>,
    /// `mdhd` creation time of each track
    pub media: Vec<NaiveDateTime>,
}

pub fn read_container_times(path: &Path) -> crate::Result<ContainerTimes> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    let reader = mp4::Mp4Reader::read_header(BufReader::new(file), size)?;

    Ok(ContainerTimes {
        movie: from_mac_epoch(reader.moov.mvhd.creation_time),
        media: reader
            .moov
            .traks
            .iter()
            .filter_map(|trak| from_mac_epoch(trak.mdia.mdhd.creation_time))
            .collect(),
    })
}

/// MP4 times count seconds since 1904-01-01 00:00:00 UTC. Zero means "unset"
/// and comes out as the 1904 sentinel.
fn from_mac_epoch(secs: u64) -> Option<NaiveDateTime> {
    let secs = i64::try_from(secs).ok()?;
    let epoch = NaiveDate::from_ymd_opt(1904, 1, 1)?.and_hms_opt(0, 0, 0)?.and_utc();
    let instant = epoch.checked_add_signed(TimeDelta::try_seconds(secs)?)?;
    Some(localize(&instant))
}
