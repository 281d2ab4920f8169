use chrono::{DateTime, NaiveDate, Utc};

/// Calendar date of a GitHub timestamp such as `2024-06-15T23:59:59Z`.
///
/// Only the text before `T` is read; no timezone conversion happens.
pub fn calendar_date(timestamp: &str) -> Option<NaiveDate> {
    let date_part = timestamp.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn date_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

pub fn today_utc() -> NaiveDate {
    date_of(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_date_ignores_time_and_offset() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 15);
        assert_eq!(calendar_date("2024-06-15T23:59:59Z"), expected);
        assert_eq!(calendar_date("2024-06-15T00:00:00+09:00"), expected);
        assert_eq!(calendar_date("2024-06-15"), expected);
    }

    #[test]
    fn test_calendar_date_rejects_garbage() {
        assert_eq!(calendar_date(""), None);
        assert_eq!(calendar_date("yesterday"), None);
        assert_eq!(calendar_date("2024-13-01T00:00:00Z"), None);
    }

    #[test]
    fn test_date_of_matches_calendar_date() {
        let instant: DateTime<Utc> = "2024-06-15T23:59:59Z".parse().unwrap();
        assert_eq!(Some(date_of(instant)), calendar_date("2024-06-15T23:59:59Z"));
    }
}
