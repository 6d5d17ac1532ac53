//! Reading of the usage log the daemon writes. The log is a CSV file with a
//! `timestamp,application,duration` header, where every row is the time an application was active
//! since the previous flush.

use std::{collections::HashMap, io::ErrorKind, path::Path, sync::Arc};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::model::{UsageRecord, WeekRecords, DAYS_IN_WEEK};

pub const SECONDS_IN_DAY: i64 = 24 * 60 * 60;

/// Reads every row of the log. A missing file means nothing was recorded yet.
pub async fn read_usage_log(path: &Path) -> Result<Vec<UsageRecord>> {
    debug!("Reading usage log {path:?}");
    let content = match tokio::fs::read(path).await {
        Ok(v) => v,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Usage log {path:?} doesn't exist yet");
            return Ok(vec![]);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read usage log {path:?}")),
    };
    Ok(parse_usage_log(&content))
}

fn parse_usage_log(content: &[u8]) -> Vec<UsageRecord> {
    let mut reader = csv::ReaderBuilder::new().from_reader(content);
    let mut records = vec![];
    for row in reader.deserialize::<UsageRecord>() {
        match row {
            Ok(v) => records.push(v),
            Err(e) => {
                // Partially written rows can appear if the daemon was killed mid write.
                warn!("Skipping malformed usage log row: {e}")
            }
        }
    }
    records
}

/// Sums durations per application for rows with `start_of_date <= timestamp <= start_of_date +
/// 1 day`. Each application keeps the timestamp of its latest row. Applications are ordered by
/// their latest appearance, newest first.
pub fn day_usage(records: &[UsageRecord], start_of_date: i64) -> Vec<UsageRecord> {
    let end_of_date = start_of_date + SECONDS_IN_DAY;
    let mut positions = HashMap::<Arc<str>, usize>::new();
    let mut result: Vec<UsageRecord> = vec![];

    for record in records.iter().rev() {
        let timestamp = record.timestamp.timestamp();
        if timestamp < start_of_date || timestamp > end_of_date {
            continue;
        }
        match positions.get(&record.application) {
            Some(&index) => result[index].duration += record.duration,
            None => {
                positions.insert(record.application.clone(), result.len());
                result.push(record.clone());
            }
        }
    }
    result
}

/// Runs [day_usage] for 7 consecutive days starting at `start_of_week`.
pub fn week_usage(records: &[UsageRecord], start_of_week: i64) -> WeekRecords {
    let days = std::array::from_fn::<_, DAYS_IN_WEEK, _>(|day| {
        day_usage(records, start_of_week + day as i64 * SECONDS_IN_DAY)
    });
    WeekRecords::new(days)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    use super::*;
    use crate::utils::logging::TEST_LOGGING;

    const DAY_START: i64 = 1706054400;

    fn record(timestamp: i64, application: &str, duration: u64) -> UsageRecord {
        UsageRecord {
            timestamp: Utc.timestamp_opt(timestamp, 0).unwrap(),
            application: application.into(),
            duration,
        }
    }

    #[tokio::test]
    async fn test_read_usage_log() -> Result<()> {
        *TEST_LOGGING;
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            "timestamp,application,duration\n\
             1706054500,firefox,120\n\
             broken row\n\
             1706054600,gnome-terminal,60\n"
        )?;

        let records = read_usage_log(file.path()).await?;
        assert_eq!(
            records,
            vec![
                record(1706054500, "firefox", 120),
                record(1706054600, "gnome-terminal", 60)
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_log_is_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let records = read_usage_log(&dir.path().join("missing.csv")).await?;
        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn test_day_usage_sums_per_application() {
        let records = vec![
            record(DAY_START - 1, "firefox", 1000),
            record(DAY_START, "firefox", 100),
            record(DAY_START + 60, "terminal", 50),
            record(DAY_START + 120, "firefox", 200),
            record(DAY_START + SECONDS_IN_DAY, "terminal", 25),
            record(DAY_START + SECONDS_IN_DAY + 1, "terminal", 1000),
        ];
        let day = day_usage(&records, DAY_START);
        assert_eq!(
            day,
            vec![
                record(DAY_START + SECONDS_IN_DAY, "terminal", 75),
                record(DAY_START + 120, "firefox", 300),
            ]
        );
    }

    #[test]
    fn test_week_usage_buckets() {
        let records = vec![
            record(DAY_START + 10, "firefox", 100),
            record(DAY_START + 3 * SECONDS_IN_DAY + 10, "terminal", 50),
        ];
        let week = week_usage(&records, DAY_START);
        assert_eq!(week.days()[0], vec![record(DAY_START + 10, "firefox", 100)]);
        assert!(week.days()[1].is_empty());
        assert_eq!(
            week.days()[3],
            vec![record(DAY_START + 3 * SECONDS_IN_DAY + 10, "terminal", 50)]
        );
    }
}
