use crate::errors::PipelineError;
use crate::models::{NormalizedRecord, RawRecord, Timestamp};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use tracing::warn;

const MONTHS: [(&str, &str, u32); 12] = [
    ("jan", "january", 1),
    ("feb", "february", 2),
    ("mar", "march", 3),
    ("apr", "april", 4),
    ("may", "may", 5),
    ("jun", "june", 6),
    ("jul", "july", 7),
    ("aug", "august", 8),
    ("sep", "september", 9),
    ("oct", "october", 10),
    ("nov", "november", 11),
    ("dec", "december", 12),
];

const WEEKDAYS: [(&str, &str); 7] = [
    ("mon", "monday"),
    ("tue", "tuesday"),
    ("wed", "wednesday"),
    ("thu", "thursday"),
    ("fri", "friday"),
    ("sat", "saturday"),
    ("sun", "sunday"),
];

const ZONE_DESIGNATORS: [&str; 3] = ["GMT", "UTC", "Z"];

const ISO_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Turns either timestamp form the data API has ever sent into a [`Timestamp`].
///
/// Accepts `"Wed, 05 Jan 2022 00:00:00"` (optionally with a trailing `GMT`) and
/// ISO-8601 (`"2022-01-05T00:00:00"`, with or without offset, or a bare date).
/// No timezone conversion is done; offsets and zone designators are dropped.
pub fn normalize(raw: &str) -> Result<Timestamp, PipelineError> {
    let malformed = || PipelineError::MalformedTimestamp(raw.to_string());
    let text = strip_weekday(raw.trim()).ok_or_else(malformed)?;

    let parsed = if looks_like_iso(text) {
        parse_iso(text)
    } else {
        parse_locale(text)
    };

    parsed
        .and_then(|instant| instant.with_nanosecond(0))
        .ok_or_else(malformed)
}

/// Normalizes a batch, dropping the records whose timestamp cannot be read.
pub fn normalize_batch(records: Vec<RawRecord>) -> NormalizedBatch {
    let mut skipped = 0;
    let mut normalized = Vec::with_capacity(records.len());

    for record in records {
        match normalize(&record.time) {
            Ok(instant) => normalized.push(NormalizedRecord {
                instant,
                value: record.value,
            }),
            Err(err) => {
                warn!("skipping record: {err}");
                skipped += 1;
            }
        }
    }

    normalized.sort_by_key(|record| record.instant);
    NormalizedBatch {
        records: normalized,
        skipped,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBatch {
    pub records: Vec<NormalizedRecord>,
    pub skipped: usize,
}

/// Strips a leading `"Wed, "`. `None` when something other than a weekday precedes a comma.
fn strip_weekday(text: &str) -> Option<&str> {
    let Some((prefix, rest)) = text.split_once(',') else {
        return Some(text);
    };
    // A comma after digits is an ISO decimal mark, not a weekday separator.
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some(text);
    }
    let prefix = prefix.to_ascii_lowercase();
    let known = WEEKDAYS
        .iter()
        .any(|(short, long)| prefix == *short || prefix == *long);
    if known { Some(rest.trim_start()) } else { None }
}

fn looks_like_iso(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 5 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    let text = text.replacen(',', ".", 1);
    let text = text.as_str();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(with_offset.naive_local());
    }
    ISO_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_locale(text: &str) -> Option<NaiveDateTime> {
    let mut tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ':')
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() == 7 && ZONE_DESIGNATORS.iter().any(|zone| zone.eq_ignore_ascii_case(tokens[6])) {
        tokens.pop();
    }
    let [day, month, year, hour, minute, second] = tokens[..] else {
        return None;
    };

    let month = month_number(month)?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)?.and_hms_opt(
        hour.parse().ok()?,
        minute.parse().ok()?,
        second.parse().ok()?,
    )
}

fn month_number(name: &str) -> Option<u32> {
    let name = name.to_ascii_lowercase();
    MONTHS
        .iter()
        .find(|(short, long, _)| name == *short || name == *long)
        .map(|(_, _, number)| *number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn raw(time: &str, value: f64) -> RawRecord {
        RawRecord {
            time: time.to_string(),
            value,
        }
    }

    #[test]
    fn locale_string_with_weekday() {
        assert_eq!(
            normalize("Wed, 05 Jan 2022 00:00:00").unwrap(),
            at(2022, 1, 5, 0, 0, 0)
        );
    }

    #[test]
    fn weekday_prefix_matches_remainder() {
        for (prefixed, bare) in [
            ("Wed, 05 Jan 2022 00:00:00", "05 Jan 2022 00:00:00"),
            ("Sunday, 31 July 2022 23:59:58", "31 July 2022 23:59:58"),
            ("fri, 1 dec 1999 12:30:05", "1 dec 1999 12:30:05"),
        ] {
            assert_eq!(normalize(prefixed).unwrap(), normalize(bare).unwrap());
        }
    }

    #[test]
    fn trailing_gmt_is_ignored() {
        assert_eq!(
            normalize("Wed, 05 Jan 2022 13:45:10 GMT").unwrap(),
            at(2022, 1, 5, 13, 45, 10)
        );
    }

    #[test]
    fn iso_forms_match_direct_parse() {
        for text in ["2022-01-05T08:30:15", "2023-11-30T00:00:01", "1999-12-31T23:59:59"] {
            let direct = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").unwrap();
            assert_eq!(normalize(text).unwrap(), direct);
        }
    }

    #[test]
    fn iso_offsets_and_fractions_are_dropped() {
        assert_eq!(
            normalize("2022-01-05T08:30:15.750Z").unwrap(),
            at(2022, 1, 5, 8, 30, 15)
        );
        assert_eq!(
            normalize("2022-01-05T08:30:15+05:00").unwrap(),
            at(2022, 1, 5, 8, 30, 15)
        );
    }

    #[test]
    fn iso_comma_decimal_mark() {
        assert_eq!(
            normalize("2022-01-05T08:30:15,5").unwrap(),
            at(2022, 1, 5, 8, 30, 15)
        );
        assert_eq!(
            normalize("2022-01-05T08:30:15,250+01:00").unwrap(),
            at(2022, 1, 5, 8, 30, 15)
        );
    }

    #[test]
    fn iso_date_and_minute_forms() {
        assert_eq!(normalize("2022-01-05").unwrap(), at(2022, 1, 5, 0, 0, 0));
        assert_eq!(normalize("2022-01-05T08:30").unwrap(), at(2022, 1, 5, 8, 30, 0));
        assert_eq!(
            normalize("2022-01-05 08:30:00").unwrap(),
            at(2022, 1, 5, 8, 30, 0)
        );
    }

    #[test]
    fn malformed_inputs_fail_closed() {
        for text in [
            "",
            "Wed, 05 Jan 2022",
            "Wed, 05 Jan 2022 00:00:00 extra",
            "05 Foo 2022 00:00:00",
            "xx Jan 2022 00:00:00",
            "31 Feb 2022 00:00:00",
            "05 Jan 2022 24:00:00",
            "Someday, 05 Jan 2022 00:00:00",
            "2022-13-01T00:00:00",
        ] {
            assert!(
                matches!(normalize(text), Err(PipelineError::MalformedTimestamp(_))),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn batch_skips_malformed_records_and_sorts() {
        let batch = normalize_batch(vec![
            raw("Thu, 06 Jan 2022 00:00:00", 2.0),
            raw("not a date", 9.0),
            raw("Wed, 05 Jan 2022 00:00:00", 1.0),
        ]);
        assert_eq!(batch.skipped, 1);
        assert_eq!(
            batch.records,
            vec![
                NormalizedRecord {
                    instant: at(2022, 1, 5, 0, 0, 0),
                    value: 1.0
                },
                NormalizedRecord {
                    instant: at(2022, 1, 6, 0, 0, 0),
                    value: 2.0
                },
            ]
        );
    }
}
