/// APOD date resolution
///
/// Turns the optional date supplied by the user into a date the APOD
/// service can serve: today by default, never in the future and never
/// before the very first APOD.
use chrono::{Local, NaiveDate};

use crate::error::DateError;

/// The first APOD was published on 1995-06-16
pub const FIRST_APOD_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
    Some(date) => date,
    None => panic!("invalid first APOD date"),
};

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve the requested date against `today`.
///
/// `None` resolves to `today`. Both bounds are inclusive.
pub fn resolve_apod_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate, DateError> {
    let Some(raw) = input else {
        return Ok(today);
    };

    let trimmed = raw.trim();
    if !is_iso_date_shape(trimmed) {
        return Err(DateError::Malformed {
            input: raw.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        });
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| DateError::Malformed {
        input: raw.to_string(),
        reason: e.to_string(),
    })?;

    validate_apod_date(date, today)
}

/// Exactly `YYYY-MM-DD`: four, two and two ASCII digits
fn is_iso_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Check an already-parsed date against the APOD publication window
pub fn validate_apod_date(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, DateError> {
    if date > today {
        return Err(DateError::InFuture { date, today });
    }
    if date < FIRST_APOD_DATE {
        return Err(DateError::BeforeFirstApod { date });
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_to_today() {
        let today = ymd(2024, 3, 1);
        assert_eq!(resolve_apod_date(None, today), Ok(today));
    }

    #[test]
    fn test_rejects_future_date() {
        let today = ymd(2024, 3, 1);
        let err = resolve_apod_date(Some("2100-01-01"), today).unwrap_err();
        assert!(matches!(err, DateError::InFuture { .. }));
    }

    #[test]
    fn test_rejects_date_before_first_apod() {
        let err = resolve_apod_date(Some("1990-01-01"), ymd(2024, 3, 1)).unwrap_err();
        assert_eq!(err, DateError::BeforeFirstApod { date: ymd(1990, 1, 1) });
    }

    #[test]
    fn test_accepts_both_boundaries() {
        let today = ymd(2024, 3, 1);
        assert_eq!(resolve_apod_date(Some("1995-06-16"), today), Ok(FIRST_APOD_DATE));
        assert_eq!(resolve_apod_date(Some("2024-03-01"), today), Ok(today));
        assert!(resolve_apod_date(Some("1995-06-15"), today).is_err());
        assert!(resolve_apod_date(Some("2024-03-02"), today).is_err());
    }

    #[test]
    fn test_accepts_real_today() {
        let now = today();
        let input = now.format("%Y-%m-%d").to_string();
        assert_eq!(resolve_apod_date(Some(input.as_str()), now), Ok(now));
    }

    #[test]
    fn test_malformed_dates_get_their_own_error() {
        let today = ymd(2024, 3, 1);
        for input in ["2024/01/01", "yesterday", "2023-02-30", "", "2024-1-1", "+2024-01-01", "2024-01-01T00:00"] {
            let err = resolve_apod_date(Some(input), today).unwrap_err();
            assert!(
                matches!(err, DateError::Malformed { .. }),
                "{:?} should be malformed, got {:?}",
                input,
                err
            );
        }
    }
}
