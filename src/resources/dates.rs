//! Date helpers shared by the resource modules.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use regex::Regex;

use crate::connector::ResManError;
use crate::time::Clock;

/// Format of date-only query parameters (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of timestamp query parameters (RFC 1123, always GMT).
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// How many days back a `modifiedSince` filter may reach.
pub const MAX_MODIFIED_SINCE_DAYS: i64 = 366;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// Formats `date` as `yyyy-MM-dd`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats `at` the way HTTP dates are written, e.g. `Tue, 15 Nov 1994 08:12:31 GMT`.
#[must_use]
pub fn format_http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// Returns true if `date` has the shape `yyyy-MM-dd`.
///
/// Only the shape is checked: `2024-13-45` passes.
#[must_use]
pub fn is_valid_date_formatted(date: &str) -> bool {
    DATE_PATTERN.is_match(date)
}

/// Parses a date given either as `yyyy-MM-dd` or as an RFC 3339 timestamp.
///
/// Timestamps are reduced to their UTC calendar date.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if is_valid_date_formatted(text) {
        return NaiveDate::parse_from_str(text, DATE_FORMAT).ok();
    }

    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|at| at.with_timezone(&Utc).date_naive())
}

/// Current instant of `clock` in UTC.
#[must_use]
pub fn now_utc(clock: &dyn Clock) -> DateTime<Utc> {
    DateTime::<Utc>::from(clock.now())
}

/// Checks a pair of optional range bounds against `today`.
///
/// # Errors
///
/// Returns [`ResManError::InvalidArgument`] if only one bound is given, the
/// bounds are reversed, or either bound lies after `today`.
pub fn validate_start_and_end_date(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), ResManError> {
    let message = match (start, end) {
        (None, None) => return Ok(()),
        (Some(_), None) => "endDate is required if startDate is provided",
        (None, Some(_)) => "startDate is required if endDate is provided",
        (Some(start), Some(end)) if start > end => "startDate must be before endDate",
        (Some(start), Some(_)) if start > today => "startDate cannot be in the future",
        (Some(_), Some(end)) if end > today => "endDate cannot be in the future",
        (Some(_), Some(_)) => return Ok(()),
    };

    Err(ResManError::invalid_argument(message))
}

/// Checks a `modifiedSince` filter: not after the start of today (UTC) and
/// no more than [`MAX_MODIFIED_SINCE_DAYS`] days before `now`.
///
/// # Errors
///
/// Returns [`ResManError::InvalidArgument`] describing the violated bound.
pub fn validate_modified_since(
    modified_since: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), ResManError> {
    let start_of_today = now.date_naive().and_time(NaiveTime::MIN).and_utc();

    if modified_since > start_of_today {
        return Err(ResManError::invalid_argument(
            "Modified since must be in the past",
        ));
    }
    if modified_since < now - TimeDelta::days(MAX_MODIFIED_SINCE_DAYS) {
        return Err(ResManError::invalid_argument(
            "Modified since date cannot be more than one year ago",
        ));
    }

    Ok(())
}
