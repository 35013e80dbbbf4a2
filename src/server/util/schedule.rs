//! Time arithmetic shared by availability management and booking.

use chrono::{DateTime, Duration, Utc};

/// End of a block that starts at `start` and lasts `minutes`.
pub fn end_of(start: DateTime<Utc>, minutes: i32) -> DateTime<Utc> {
    start + Duration::minutes(i64::from(minutes))
}

/// Whether two half-open intervals `[start, start + minutes)` share any instant.
///
/// Back-to-back blocks do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_minutes: i32,
    b_start: DateTime<Utc>,
    b_minutes: i32,
) -> bool {
    a_start < end_of(b_start, b_minutes) && b_start < end_of(a_start, a_minutes)
}

/// Start times of a weekly recurring series.
///
/// Occurrence `i` (zero based) starts `i * interval_weeks` weeks after `first`.
pub fn recurring_starts(
    first: DateTime<Utc>,
    occurrences: u32,
    interval_weeks: u32,
) -> Vec<DateTime<Utc>> {
    (0..occurrences)
        .map(|i| first + Duration::weeks(i64::from(i) * i64::from(interval_weeks)))
        .collect()
}
