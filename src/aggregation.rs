//! Transformations applied to fetched records before they are displayed.

use crate::model::{AppUsage, ChartSeries, UsageRecord, WeekRecords, DAYS_IN_WEEK};

pub const DAY_CHART_LABEL: &str = "Today's Screen Time";
pub const WEEK_CHART_LABEL: &str = "Week Screen Time";
pub const SHORT_DAY_LABELS: [&str; DAYS_IN_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Orders records for usage tables. Equal durations keep their original order.
pub fn sort_by_duration_descending(records: &[UsageRecord]) -> Vec<UsageRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.duration.cmp(&a.duration));
    sorted
}

/// Applications ordered by case-insensitive name, values in minutes.
pub fn build_day_chart_series(records: &[UsageRecord]) -> ChartSeries {
    let mut sorted = records.iter().collect::<Vec<_>>();
    sorted.sort_by_cached_key(|v| v.application.to_lowercase());

    let labels = sorted.iter().map(|v| v.application.to_string()).collect();
    let data = sorted.iter().map(|v| v.duration as f64 / 60.).collect();
    ChartSeries::single(DAY_CHART_LABEL, labels, data)
}

/// One point per day of the week, values in minutes.
pub fn build_week_chart_series(week: &WeekRecords) -> ChartSeries {
    let labels = SHORT_DAY_LABELS.iter().map(|v| v.to_string()).collect();
    let data = week
        .days()
        .iter()
        .map(|day| total_duration(day) as f64 / 60.)
        .collect();
    ChartSeries::single(WEEK_CHART_LABEL, labels, data)
}

/// Record with the strictly greatest duration. The first one wins ties.
pub fn most_used(week: &WeekRecords) -> AppUsage {
    let mut result = AppUsage::sentinel(0);
    for record in week.flatten() {
        if record.duration > result.duration {
            result = AppUsage {
                application: record.application.clone(),
                duration: record.duration,
            };
        }
    }
    result
}

/// Record with the strictly smallest duration. The first one wins ties.
pub fn least_used(week: &WeekRecords) -> AppUsage {
    let mut result = AppUsage::sentinel(u64::MAX);
    for record in week.flatten() {
        if record.duration < result.duration {
            result = AppUsage {
                application: record.application.clone(),
                duration: record.duration,
            };
        }
    }
    result
}

pub fn total_duration(records: &[UsageRecord]) -> u64 {
    records.iter().map(|v| v.duration).sum()
}

pub fn week_total_duration(week: &WeekRecords) -> u64 {
    week.flatten().map(|v| v.duration).sum()
}

pub fn average_per_day(week: &WeekRecords) -> u64 {
    week_total_duration(week) / DAYS_IN_WEEK as u64
}
