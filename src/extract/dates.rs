//! Timestamp reconstruction for forecast rows.
//!
//! Forecast pages encode dates only partially: a leading day+month label
//! with implied daily or 6-hour increments, or an absolute UTC string
//! buried in a `title` attribute. Three strategies rebuild Unix
//! timestamps from those shapes. The pages omit the year, so the current
//! date is an explicit parameter rather than read ambiently; labels near
//! a year boundary inherit whatever year the caller passes in.

use chrono::{DateTime, Datelike, Days, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use tracing::debug;

use crate::constants::{DATE_LABEL_DELIMITER, UTC_DATETIME_FORMAT, UTC_SEPARATORS};
use crate::error::{GismeteoError, Result};

/// Sequential-day strategy: the first label anchors the run at local
/// midnight and each further matched node advances one calendar day.
/// Month rollover and leap years come from chrono's date arithmetic.
pub fn sequential_days(labels: &[String], today: NaiveDate) -> Result<Vec<i64>> {
    let Some(first) = labels.first() else {
        return Ok(Vec::new());
    };
    let base = parse_date_label(first, today.year())?;
    debug!(label = %first, %base, rows = labels.len(), "anchoring daily run");

    let mut out = Vec::with_capacity(labels.len());
    for offset in 0..labels.len() {
        let date = base
            .checked_add_days(Days::new(offset as u64))
            .ok_or_else(|| GismeteoError::parse(format!("date overflow from label '{first}'")))?;
        out.push(local_midnight(date)?.timestamp());
    }
    Ok(out)
}

/// Quarter-day strategy: one date label per day, four synthetic 6-hour
/// slots per label. The base time is the first label's local midnight
/// and every slot thereafter steps exactly 6 hours, so day boundaries
/// between labels are implied by the stepping, never re-anchored.
pub fn quarter_days(labels: &[String], today: NaiveDate) -> Result<Vec<i64>> {
    let Some(first) = labels.first() else {
        return Ok(Vec::new());
    };
    let date_part = first
        .split_once(DATE_LABEL_DELIMITER)
        .map(|(_, rest)| rest)
        .unwrap_or(first);
    let base = local_midnight(parse_date_label(date_part, today.year())?)?;

    let slots = labels.len() * 4;
    let out = (0..slots)
        .map(|slot| (base + Duration::hours(6 * slot as i64)).timestamp())
        .collect();
    Ok(out)
}

/// Embedded-UTC strategy, applied per row: locate the UTC-labelled
/// suffix using either known separator phrase and parse the remainder
/// as `YYYY-MM-DD HH:mm:ss` in UTC. Rows lacking both separators fail
/// individually.
pub fn parse_utc_suffix(text: &str) -> Result<i64> {
    let suffix = UTC_SEPARATORS
        .iter()
        .find_map(|separator| text.split_once(separator).map(|(_, rest)| rest))
        .ok_or_else(|| {
            GismeteoError::parse(format!("no UTC separator in time label '{text}'"))
        })?;

    let parsed = NaiveDateTime::parse_from_str(suffix.trim(), UTC_DATETIME_FORMAT)?;
    Ok(parsed.and_utc().timestamp())
}

/// Combine a clock label ("8:36") with the given date, at local time.
/// Used for the current-conditions sunrise/sunset fields.
pub fn clock_label_on(date: NaiveDate, label: &str) -> Result<i64> {
    let time = NaiveTime::parse_from_str(label.trim(), "%H:%M")?;
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| GismeteoError::parse(format!("clock label '{label}' has no local instant")))
}

/// Parse a "30 янв" / "30 jan" style label, attaching the given year.
fn parse_date_label(label: &str, year: i32) -> Result<NaiveDate> {
    let mut parts = label.split_whitespace();
    let (day, month_token) = match (parts.next(), parts.next()) {
        (Some(day), Some(month)) => (day, month),
        _ => {
            return Err(GismeteoError::parse(format!(
                "malformed date label '{label}'"
            )));
        }
    };

    let day: u32 = day
        .parse()
        .map_err(|_| GismeteoError::parse(format!("bad day in date label '{label}'")))?;
    let month = month_number(month_token)
        .ok_or_else(|| GismeteoError::parse(format!("unknown month in date label '{label}'")))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| GismeteoError::parse(format!("invalid date in label '{label}'")))
}

/// Map an abbreviated month name (russian or english) to its number.
fn month_number(token: &str) -> Option<u32> {
    const MONTHS: [(&[&str], u32); 12] = [
        (&["янв", "jan"], 1),
        (&["фев", "feb"], 2),
        (&["мар", "mar"], 3),
        (&["апр", "apr"], 4),
        (&["мая", "май", "may"], 5),
        (&["июн", "jun"], 6),
        (&["июл", "jul"], 7),
        (&["авг", "aug"], 8),
        (&["сен", "sep"], 9),
        (&["окт", "oct"], 10),
        (&["ноя", "nov"], 11),
        (&["дек", "dec"], 12),
    ];

    let normalized = token.trim_end_matches('.').to_lowercase();
    MONTHS.iter().find_map(|(forms, number)| {
        forms
            .iter()
            .any(|form| normalized.starts_with(form))
            .then_some(*number)
    })
}

fn local_midnight(date: NaiveDate) -> Result<DateTime<Local>> {
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| GismeteoError::parse(format!("no local midnight for {date}")))
}
