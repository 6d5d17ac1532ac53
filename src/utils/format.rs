use chrono::{Datelike, NaiveDate};

pub const LOADING_PLACEHOLDER: &str = "Loading...";
pub const MISSING_DAY_PLACEHOLDER: &str = "Something went wrong!";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Formats seconds as `1h 5m` or `5m`. Seconds are truncated, never rounded up.
pub fn format_duration(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let hours = minutes / 60;
    let remaining_minutes = minutes % 60;
    if hours == 0 {
        format!("{remaining_minutes}m")
    } else {
        format!("{hours}h {remaining_minutes}m")
    }
}

/// `Jan 24, 2024` style label. Dates that aren't resolved yet render as a loading placeholder.
pub fn format_calendar_date(date: Option<NaiveDate>) -> String {
    let Some(date) = date else {
        return LOADING_PLACEHOLDER.to_string();
    };
    format!("{} {}, {}", MONTHS[date.month0() as usize], date.day(), date.year())
}

pub fn day_of_week_name(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => DAY_NAMES[date.weekday().num_days_from_sunday() as usize].to_string(),
        None => MISSING_DAY_PLACEHOLDER.to_string(),
    }
}

/// Name of a day bucket inside a week. `None` for indexes outside of a week.
pub fn day_name_for_index(index: usize) -> Option<&'static str> {
    DAY_NAMES.get(index).copied()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_duration(90), "1m");
        assert_eq!(format_duration(1800), "30m");
        assert_eq!(format_duration(3600), "1h 0m");
        assert_eq!(format_duration(3661), "1h 1m");
        assert_eq!(format_duration(3600 * 25 + 59 * 60 + 59), "25h 59m");
    }

    #[test]
    fn test_format_calendar_date() {
        assert_eq!(
            format_calendar_date(NaiveDate::from_ymd_opt(2024, 1, 24)),
            "Jan 24, 2024"
        );
        assert_eq!(
            format_calendar_date(NaiveDate::from_ymd_opt(2023, 12, 3)),
            "Dec 3, 2023"
        );
        assert_eq!(format_calendar_date(None), LOADING_PLACEHOLDER);
    }

    #[test]
    fn test_day_of_week_name() {
        // 2024-04-07 was a Sunday
        assert_eq!(day_of_week_name(NaiveDate::from_ymd_opt(2024, 4, 7)), "Sunday");
        assert_eq!(day_of_week_name(NaiveDate::from_ymd_opt(2024, 4, 13)), "Saturday");
        assert_eq!(day_of_week_name(None), MISSING_DAY_PLACEHOLDER);
        assert_eq!(day_name_for_index(1), Some("Monday"));
        assert_eq!(day_name_for_index(7), None);
    }
}
