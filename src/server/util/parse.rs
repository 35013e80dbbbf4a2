use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::str::FromStr;

use crate::server::error::{internal::InternalError, AppError};

/// Parses an enum stored by name in a text column.
///
/// Used at the repository boundary when converting entity models into domain models.
///
/// # Arguments
/// - `column` - Column name used in the error, e.g. `"lesson.status"`
/// - `id` - Primary key of the row being converted
/// - `value` - The stored text
///
/// # Returns
/// - `Ok(T)` - Parsed value
/// - `Err(AppError::InternalErr(InvalidStoredValue))` - Stored text is not a known variant
pub fn parse_stored<T: FromStr>(column: &'static str, id: i32, value: &str) -> Result<T, AppError> {
    value.parse::<T>().map_err(|_| {
        InternalError::InvalidStoredValue {
            column,
            id,
            value: value.to_string(),
        }
        .into()
    })
}

/// Parses a `YYYY-MM-DD` date, returning `None` for anything else.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Parses a calendar window bound sent by the browser.
///
/// Accepts RFC 3339 timestamps as well as bare `YYYY-MM-DD` dates (interpreted as
/// midnight UTC). Empty values mean "unbounded".
///
/// # Returns
/// - `Ok(Some(DateTime))` - Parsed bound
/// - `Ok(None)` - No bound given
/// - `Err(AppError::BadRequest)` - Value present but not a date
pub fn parse_date_bound(
    name: &str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }

    if let Some(date) = parse_date(value) {
        return Ok(Some(date.and_time(NaiveTime::MIN).and_utc()));
    }

    Err(AppError::BadRequest(format!(
        "Invalid {}: expected YYYY-MM-DD or an RFC 3339 timestamp",
        name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lesson::LessonStatus;
    use chrono::TimeZone;

    #[test]
    fn parses_known_stored_status() {
        let status: LessonStatus = parse_stored("lesson.status", 1, "Cancelled").unwrap();
        assert_eq!(status, LessonStatus::Cancelled);
    }

    #[test]
    fn rejects_unknown_stored_status() {
        let result = parse_stored::<LessonStatus>("lesson.status", 7, "Pending");
        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::InvalidStoredValue { id: 7, .. }))
        ));
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let bound = parse_date_bound("start_date", Some("2025-03-01")).unwrap();
        assert_eq!(bound, Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn parses_offset_timestamp_into_utc() {
        let bound = parse_date_bound("start_date", Some("2025-03-01T10:00:00+02:00")).unwrap();
        assert_eq!(bound, Some(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap()));
    }

    #[test]
    fn treats_empty_bound_as_unbounded() {
        assert_eq!(parse_date_bound("end_date", Some("  ")).unwrap(), None);
        assert_eq!(parse_date_bound("end_date", None).unwrap(), None);
    }

    #[test]
    fn rejects_garbage_bound() {
        let result = parse_date_bound("end_date", Some("next tuesday"));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
