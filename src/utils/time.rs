use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone};

/// Start of the given calendar day in `tz`. Days where midnight doesn't exist because of a DST
/// jump start at the earliest valid time.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let mut time = date.and_time(NaiveTime::MIN);
    loop {
        if let Some(v) = tz.from_local_datetime(&time).earliest() {
            return v;
        }
        time += Duration::minutes(30);
    }
}

/// Epoch seconds of local midnight for a calendar day. This is the value sent to the daemon when
/// asking for a day or a week.
pub fn start_of_date_secs(date: NaiveDate) -> i64 {
    local_midnight(&Local, date).timestamp()
}

/// Returns midnight of the most recent Sunday at or before `reference`.
pub fn previous_or_current_sunday<Tz: TimeZone>(reference: &DateTime<Tz>) -> DateTime<Tz> {
    let days_since_sunday = reference.weekday().num_days_from_sunday();
    let sunday = reference.date_naive() - Duration::days(days_since_sunday.into());
    local_midnight(&reference.timezone(), sunday)
}

/// Moves a week start by whole calendar weeks, keeping it at midnight.
pub fn shift_weeks<Tz: TimeZone>(week_start: &DateTime<Tz>, weeks: i64) -> DateTime<Tz> {
    local_midnight(
        &week_start.timezone(),
        week_start.date_naive() + Duration::weeks(weeks),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

    use super::{previous_or_current_sunday, shift_weeks, start_of_date_secs};

    #[test]
    fn test_previous_or_current_sunday() {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        for offset in 0..21 {
            for hour in [0, 7, 23] {
                let reference = Utc.from_utc_datetime(
                    &(start + Duration::days(offset))
                        .and_time(NaiveTime::from_hms_opt(hour, 15, 30).unwrap()),
                );
                let sunday = previous_or_current_sunday(&reference);

                assert_eq!(sunday.weekday().num_days_from_sunday(), 0);
                assert_eq!(sunday.time(), NaiveTime::MIN);
                assert_eq!(sunday.nanosecond(), 0);
                assert!(sunday <= reference);
                assert!(reference.date_naive() - sunday.date_naive() <= Duration::days(6));
            }
        }
    }

    #[test]
    fn test_sunday_maps_to_itself() {
        let reference = Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2024, 4, 7)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
        );
        assert_eq!(
            previous_or_current_sunday(&reference).date_naive(),
            reference.date_naive()
        );
    }

    #[test]
    fn test_shift_weeks_keeps_midnight() {
        let sunday = Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2024, 4, 7)
                .unwrap()
                .and_time(NaiveTime::MIN),
        );
        let next = shift_weeks(&sunday, 1);
        let previous = shift_weeks(&sunday, -1);
        assert_eq!(next.date_naive(), NaiveDate::from_ymd_opt(2024, 4, 14).unwrap());
        assert_eq!(previous.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(next.time(), NaiveTime::MIN);
        assert_eq!(previous.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_start_of_date_secs_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 24).unwrap();
        let secs = start_of_date_secs(date);
        let back = Local.timestamp_opt(secs, 0).unwrap();
        assert_eq!(back.date_naive(), date);
        assert_eq!(back.time(), NaiveTime::MIN);
    }
}
