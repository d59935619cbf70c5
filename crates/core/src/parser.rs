//! Parsing of the compact meeting-time text found in catalog records.
//!
//! A schedule is a list of segments separated by `<p>` (or newlines). Each
//! segment names a day, a period or period span, and optionally a room:
//!
//! ```text
//! 월1~3(C-103)<p>수2(C-103)
//! Tue 4-5 Hall 201
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::{
    errors::ParseError,
    models::schedule::{Day, ScheduleTime},
};

const MAX_SPAN: u32 = 256;

static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<day>[^\d\s]+)\s*(?P<start>\d+)(?:\s*[~\-]\s*(?P<end>\d+))?(?P<room>(?:\s|\().*)?$",
    )
    .expect("segment pattern is valid")
});

/// Parses every segment, returning the good ones and silently dropping the rest.
pub fn parse_schedule(raw: &str) -> Vec<ScheduleTime> {
    parse_segments(raw)
        .filter_map(|segment| match segment {
            Ok(time) => Some(time),
            Err(err) => {
                tracing::debug!("Skipping schedule segment: {}", err);
                None
            }
        })
        .collect()
}

/// Parses each segment of `raw` independently.
pub fn parse_segments(raw: &str) -> impl Iterator<Item = Result<ScheduleTime, ParseError>> + '_ {
    raw.split("<p>")
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_segment)
}

fn parse_segment(segment: &str) -> Result<ScheduleTime, ParseError> {
    let malformed = |reason: &str| ParseError::MalformedSegment {
        segment: segment.to_string(),
        reason: reason.to_string(),
    };

    let captures = SEGMENT
        .captures(segment)
        .ok_or_else(|| malformed("expected a day followed by periods"))?;

    let day: Day = captures["day"]
        .parse()
        .map_err(|err: crate::models::schedule::UnknownDay| malformed(&err.to_string()))?;

    let start: u32 = captures["start"]
        .parse()
        .map_err(|_| malformed("start period is not a number"))?;
    let end: u32 = match captures.name("end") {
        Some(end) => end
            .as_str()
            .parse()
            .map_err(|_| malformed("end period is not a number"))?,
        None => start,
    };

    if start == 0 {
        return Err(malformed("periods start at 1"));
    }
    if end < start {
        return Err(malformed("period span runs backwards"));
    }
    if end - start >= MAX_SPAN {
        return Err(malformed("period span is too long"));
    }

    let room = captures
        .name("room")
        .map(|room| {
            room.as_str()
                .trim()
                .trim_start_matches('(')
                .trim_end_matches(')')
                .trim()
                .to_string()
        })
        .filter(|room| !room.is_empty());

    Ok(ScheduleTime {
        day,
        range: (start..=end).collect(),
        room,
    })
}
