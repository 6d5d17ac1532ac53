//! Plain text rendering of day and week data for one-shot commands.

use std::num::NonZeroU32;

use chrono::NaiveDate;

use crate::{
    aggregation::{
        average_per_day, build_day_chart_series, build_week_chart_series, least_used, most_used,
        sort_by_duration_descending, total_duration, week_total_duration,
    },
    model::{AppUsage, UsageRecord, WeekRecords},
    utils::format::{day_name_for_index, day_of_week_name, format_calendar_date, format_duration},
};

pub const NO_DATA: &str = "No data";

pub fn delete_warning(months: NonZeroU32) -> String {
    format!(
        "You are about to delete the oldest {months} months of data. This action cannot be undone. \
         Are you sure you want to proceed?"
    )
}

pub fn day_report(date: NaiveDate, records: &[UsageRecord]) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{}, {}",
            day_of_week_name(Some(date)),
            format_calendar_date(Some(date))
        ),
        format!(
            "Total Screen Time\t{}",
            format_duration(total_duration(records))
        ),
        String::new(),
    ];
    for (label, minutes) in build_day_chart_series(records).points() {
        lines.push(format!("{minutes:.1}m\t{label}"));
    }
    lines.push(String::new());
    lines.extend(usage_table(records));
    lines
}

pub fn week_report(week_start: NaiveDate, week: &WeekRecords) -> Vec<String> {
    let mut lines = vec![
        format!("Week Beginning: {}", format_calendar_date(Some(week_start))),
        format!(
            "Total Screen Time\t{}",
            format_duration(week_total_duration(week))
        ),
        format!(
            "Average Time Per Day\t{}",
            format_duration(average_per_day(week))
        ),
        format!("Most Used Weekly App\t{}", describe_usage(&most_used(week))),
        format!("Least Used Weekly App\t{}", describe_usage(&least_used(week))),
        String::new(),
    ];
    for (label, minutes) in build_week_chart_series(week).points() {
        lines.push(format!("{label}\t{minutes:.1}m"));
    }
    for (index, day) in week.days().iter().enumerate() {
        lines.push(String::new());
        lines.push(day_name_for_index(index).unwrap_or_default().to_string());
        lines.extend(usage_table(day));
    }
    lines
}

pub fn print_day(date: NaiveDate, records: &[UsageRecord]) {
    for line in day_report(date, records) {
        println!("{line}");
    }
}

pub fn print_week(week_start: NaiveDate, week: &WeekRecords) {
    for line in week_report(week_start, week) {
        println!("{line}");
    }
}

fn usage_table(records: &[UsageRecord]) -> Vec<String> {
    sort_by_duration_descending(records)
        .iter()
        .map(|v| format!("{}\t{}", format_duration(v.duration), v.application))
        .collect()
}

fn describe_usage(usage: &AppUsage) -> String {
    if usage.is_sentinel() {
        NO_DATA.to_string()
    } else {
        format!("{} ({})", usage.application, format_duration(usage.duration))
    }
}
