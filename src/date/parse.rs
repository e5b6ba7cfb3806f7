//! Ordered parsing of loosely formatted date strings, as printed by ffprobe.

use chrono::{DateTime, NaiveDateTime};

use super::{localize, truncate};

/// One attempt at reading a date string. `None` means "not this format".
pub type Parser = fn(&str) -> Option<NaiveDateTime>;

/// Formats tried on probe values, first match wins.
pub const PROBE_PARSERS: &[Parser] = &[
    fractional_with_offset,
    space_separated,
    iso_local,
    iso_offset,
    iso_zoned,
];

/// Run `parsers` in order and return the first hit, truncated to seconds.
pub fn first_match(s: &str, parsers: &[Parser]) -> Option<NaiveDateTime> {
    parsers.iter().find_map(|parse| parse(s)).map(truncate)
}

pub fn parse_probe_value(s: &str) -> Option<NaiveDateTime> {
    first_match(s.trim(), PROBE_PARSERS)
}

/// Parse one line of `ffprobe -print_format flat` output.
///
/// Only keys mentioning `date` or `creation_time` are considered; the value
/// may be quoted. Anything else yields `None`.
pub fn probe_line(line: &str) -> Option<NaiveDateTime> {
    let (key, value) = line.split_once('=')?;
    if !(key.contains("date") || key.contains("creation_time")) {
        return None;
    }
    parse_probe_value(value.trim().trim_matches('"'))
}

/// All dates found in a full probe report.
pub fn probe_dates(output: &str) -> Vec<NaiveDateTime> {
    output.lines().filter_map(probe_line).collect()
}

// 2021-01-02T03:04:05.000000Z
fn fractional_with_offset(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.6f%#z")
        .ok()
        .map(|dt| localize(&dt))
}

// 2021-01-02 03:04:05
fn space_separated(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()
}

// 2021-01-02T03:04:05[.fff]
fn iso_local(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

// 2021-01-02T03:04:05+01:00
fn iso_offset(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(s).ok().map(|dt| localize(&dt))
}

// 2021-01-02T03:04:05+01:00[Europe/Paris]; the offset anchors the instant
fn iso_zoned(s: &str) -> Option<NaiveDateTime> {
    let (base, _zone) = s.strip_suffix(']')?.split_once('[')?;
    iso_offset(base)
}
