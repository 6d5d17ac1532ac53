use std::fmt::Display;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use crate::utils::clock::Clock;

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct DateArgs {
    #[arg(
        long,
        short,
        help = "Day to show. Examples are \"today\", \"yesterday\", \"3 days ago\", \"15/03/2025\". Today by default"
    )]
    date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Turns a human readable date into a calendar day in local time.
pub fn resolve_date(DateArgs { date, date_style }: DateArgs, clock: &dyn Clock) -> Result<NaiveDate> {
    let now = clock.now();
    let Some(date) = date else {
        return Ok(now.date_naive());
    };
    match parse_date_string(&date, now, date_style.into()) {
        Ok(v) => Ok(v.with_timezone(&Local).date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {date:?}: {e}"),
            )
            .into()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, TimeZone};

    use super::{resolve_date, DateArgs, DateStyle};
    use crate::utils::clock::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(
            Local
                .from_local_datetime(
                    &NaiveDate::from_ymd_opt(2024, 4, 10)
                        .unwrap()
                        .and_hms_opt(12, 0, 0)
                        .unwrap(),
                )
                .earliest()
                .unwrap(),
        )
    }

    fn args(date: Option<&str>, date_style: DateStyle) -> DateArgs {
        DateArgs {
            date: date.map(String::from),
            date_style,
        }
    }

    #[test]
    fn test_resolve_date() {
        let clock = clock();
        assert_eq!(
            resolve_date(args(None, DateStyle::Uk), &clock).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
        );
        assert_eq!(
            resolve_date(args(Some("yesterday"), DateStyle::Uk), &clock).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 9).unwrap()
        );
        assert_eq!(
            resolve_date(args(Some("03/02/2024"), DateStyle::Uk), &clock).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()
        );
        assert_eq!(
            resolve_date(args(Some("03/02/2024"), DateStyle::Us), &clock).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
        assert!(resolve_date(args(Some("not a date"), DateStyle::Uk), &clock).is_err());
    }
}
