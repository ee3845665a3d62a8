//! Date and time validators.

use chrono::{Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{FieldResult, Rejection, ValidationContext};

const MIN_COMPLAINANT_AGE: i32 = 18;
const MAX_COMPLAINANT_AGE: i32 = 120;
const TRANSACTION_LOOKBACK_MONTHS: u32 = 5 * 12;

static TIME_12H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{1,2})\s*([AaPp][Mm])$").expect("12h pattern is valid")
});

static TIME_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{1,2})$").expect("24h pattern is valid"));

/// Date of birth in `D-M-YYYY`; the complainant must be at least 18.
pub fn validate_dob(raw: &str, ctx: &ValidationContext) -> FieldResult {
    let birth = parse_day_month_year(raw, ctx, "2-3-2001 or 02-03-2001")?;
    if birth > ctx.today {
        return Err(Rejection::new("Date of birth cannot be in the future"));
    }

    let age = age_on(birth, ctx.today);
    if age < MIN_COMPLAINANT_AGE {
        return Err(Rejection::new("Complainant must be at least 18 years old"));
    }
    if age > MAX_COMPLAINANT_AGE {
        return Err(Rejection::new("Invalid date of birth"));
    }
    Ok(format_date(birth))
}

/// Transaction date in `D-M-YYYY`, within the last five years.
pub fn validate_transaction_date(raw: &str, ctx: &ValidationContext) -> FieldResult {
    let date = parse_day_month_year(raw, ctx, "2-3-2024 or 02-03-2024")?;
    if date > ctx.today {
        return Err(Rejection::new("Transaction date cannot be in the future"));
    }

    let earliest = ctx
        .today
        .checked_sub_months(Months::new(TRANSACTION_LOOKBACK_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    if date < earliest {
        return Err(Rejection::new(
            "Transaction date seems too old (more than 5 years)",
        ));
    }
    Ok(format_date(date))
}

/// Time of day as 24-hour `HH:MM` or 12-hour `H:MM AM/PM`.
///
/// Always normalized to the 12-hour form, e.g. `14:30` becomes `02:30 PM`.
pub fn validate_transaction_time(raw: &str, _ctx: &ValidationContext) -> FieldResult {
    let time = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(caps) = TIME_12H.captures(&time) {
        let hour: u32 = caps[1].parse().map_err(|_| invalid_time())?;
        let minute: u32 = caps[2].parse().map_err(|_| invalid_time())?;
        let meridiem = caps[3].to_uppercase();

        if !(1..=12).contains(&hour) {
            return Err(Rejection::new(
                "Hour must be between 1 and 12 for 12-hour format",
            ));
        }
        if minute > 59 {
            return Err(Rejection::new("Minutes must be between 0 and 59"));
        }
        return Ok(format!("{:02}:{:02} {}", hour, minute, meridiem));
    }

    if let Some(caps) = TIME_24H.captures(&time) {
        let hour: u32 = caps[1].parse().map_err(|_| invalid_time())?;
        let minute: u32 = caps[2].parse().map_err(|_| invalid_time())?;

        if hour > 23 {
            return Err(Rejection::new(
                "Hour must be between 0 and 23 for 24-hour format",
            ));
        }
        if minute > 59 {
            return Err(Rejection::new("Minutes must be between 0 and 59"));
        }
        let (display_hour, meridiem) = match hour {
            0 => (12, "AM"),
            1..=11 => (hour, "AM"),
            12 => (12, "PM"),
            _ => (hour - 12, "PM"),
        };
        return Ok(format!("{:02}:{:02} {}", display_hour, minute, meridiem));
    }

    Err(invalid_time())
}

fn invalid_time() -> Rejection {
    Rejection::new(
        "Invalid time format. Use HH:MM (24-hour) or HH:MM AM/PM (12-hour). \
         Examples: 14:30, 2:30 PM, 02:03 pm",
    )
}

fn parse_day_month_year(
    raw: &str,
    ctx: &ValidationContext,
    example: &str,
) -> Result<NaiveDate, Rejection> {
    let format_error = || {
        Rejection::new(format!(
            "Invalid date format. Use D-M-YYYY or DD-MM-YYYY (e.g., {})",
            example
        ))
    };

    let parts: Vec<&str> = raw.trim().split('-').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format_error());
    }
    let widths_ok = (1..=2).contains(&parts[0].len())
        && (1..=2).contains(&parts[1].len())
        && parts[2].len() == 4;
    if !widths_ok || !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
        return Err(format_error());
    }

    let day: u32 = parts[0].parse().map_err(|_| format_error())?;
    let month: u32 = parts[1].parse().map_err(|_| format_error())?;
    let year: i32 = parts[2].parse().map_err(|_| format_error())?;

    if !(1..=31).contains(&day) {
        return Err(Rejection::new("Day must be between 1 and 31"));
    }
    if !(1..=12).contains(&month) {
        return Err(Rejection::new("Month must be between 1 and 12"));
    }
    if year < 1900 || year > ctx.today.year() {
        return Err(Rejection::new("Year must be between 1900 and current year"));
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Rejection::new(format!(
            "Invalid date values. {:02}-{:02}-{} does not exist",
            day, month, year
        ))
    })
}

fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let had_birthday = (today.month(), today.day()) >= (birth.month(), birth.day());
    today.year() - birth.year() - if had_birthday { 0 } else { 1 }
}

fn format_date(date: NaiveDate) -> String {
    format!("{:02}-{:02}-{}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::test_support::ctx;

    mod dob {
        use super::*;

        #[test]
        fn rejects_minor() {
            let err = validate_dob("15-6-2010", &ctx()).unwrap_err();
            assert!(err.reason().contains("at least 18"));
        }

        #[test]
        fn accepts_adult_and_pads() {
            assert_eq!(validate_dob("15-6-2000", &ctx()), Ok("15-06-2000".to_string()));
        }

        #[test]
        fn eighteenth_birthday_counts() {
            // ctx() is 2025-06-20
            assert!(validate_dob("20-6-2007", &ctx()).is_ok());
            assert!(validate_dob("21-6-2007", &ctx()).is_err());
        }

        #[test]
        fn rejects_impossible_dates() {
            let err = validate_dob("31-2-2000", &ctx()).unwrap_err();
            assert!(err.reason().contains("does not exist"));
            assert!(validate_dob("0-5-2000", &ctx()).is_err());
            assert!(validate_dob("5-13-2000", &ctx()).is_err());
        }

        #[test]
        fn rejects_wrong_shape() {
            assert!(validate_dob("2000-06-15", &ctx()).is_err());
            assert!(validate_dob("15/06/2000", &ctx()).is_err());
            assert!(validate_dob("15-06-00", &ctx()).is_err());
        }

        #[test]
        fn rejects_implausible_age() {
            assert!(validate_dob("1-1-1900", &ctx()).is_err());
        }
    }

    mod transaction_date {
        use super::*;

        #[test]
        fn accepts_recent_date() {
            assert_eq!(
                validate_transaction_date("2-3-2024", &ctx()),
                Ok("02-03-2024".to_string())
            );
        }

        #[test]
        fn accepts_today() {
            assert!(validate_transaction_date("20-06-2025", &ctx()).is_ok());
        }

        #[test]
        fn rejects_future() {
            let err = validate_transaction_date("21-6-2025", &ctx()).unwrap_err();
            assert!(err.reason().contains("future"));
        }

        #[test]
        fn rejects_older_than_five_years() {
            assert!(validate_transaction_date("20-6-2020", &ctx()).is_ok());
            let err = validate_transaction_date("19-6-2020", &ctx()).unwrap_err();
            assert!(err.reason().contains("too old"));
        }
    }

    mod transaction_time {
        use super::*;

        #[test]
        fn converts_24_hour_to_12_hour() {
            assert_eq!(validate_transaction_time("14:30", &ctx()), Ok("02:30 PM".to_string()));
            assert_eq!(validate_transaction_time("0:05", &ctx()), Ok("12:05 AM".to_string()));
            assert_eq!(validate_transaction_time("12:00", &ctx()), Ok("12:00 PM".to_string()));
            assert_eq!(validate_transaction_time("9:3", &ctx()), Ok("09:03 AM".to_string()));
        }

        #[test]
        fn normalizes_12_hour_input() {
            assert_eq!(validate_transaction_time("2:30 pm", &ctx()), Ok("02:30 PM".to_string()));
            assert_eq!(validate_transaction_time("02:03PM", &ctx()), Ok("02:03 PM".to_string()));
            assert_eq!(
                validate_transaction_time("  11:59   Am ", &ctx()),
                Ok("11:59 AM".to_string())
            );
        }

        #[test]
        fn rejects_out_of_range() {
            assert!(validate_transaction_time("24:00", &ctx()).is_err());
            assert!(validate_transaction_time("13:00 PM", &ctx()).is_err());
            assert!(validate_transaction_time("0:30 AM", &ctx()).is_err());
            assert!(validate_transaction_time("10:60", &ctx()).is_err());
        }

        #[test]
        fn rejects_garbage() {
            assert!(validate_transaction_time("half past two", &ctx()).is_err());
            assert!(validate_transaction_time("1430", &ctx()).is_err());
        }
    }
}
