use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DAYS_IN_WEEK: usize = 7;

/// Accumulated active time of one application inside a time bucket. Produced by the daemon side
/// and never modified after it's received.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct UsageRecord {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub application: Arc<str>,
    /// Active time in seconds
    pub duration: u64,
}

/// Records of a whole week. Index 0 is Sunday.
#[derive(PartialEq, Eq, Debug, Serialize, Clone, Default)]
pub struct WeekRecords([Vec<UsageRecord>; DAYS_IN_WEEK]);

impl WeekRecords {
    pub fn new(days: [Vec<UsageRecord>; DAYS_IN_WEEK]) -> Self {
        Self(days)
    }

    pub fn days(&self) -> &[Vec<UsageRecord>; DAYS_IN_WEEK] {
        &self.0
    }

    /// Iterates over records of every day, starting from Sunday.
    pub fn flatten(&self) -> impl Iterator<Item = &UsageRecord> {
        self.0.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Vec::is_empty)
    }
}

impl TryFrom<Vec<Vec<UsageRecord>>> for WeekRecords {
    type Error = anyhow::Error;

    fn try_from(value: Vec<Vec<UsageRecord>>) -> Result<Self> {
        let len = value.len();
        let days: [Vec<UsageRecord>; DAYS_IN_WEEK] = value
            .try_into()
            .map_err(|_| anyhow!("Expected {DAYS_IN_WEEK} day buckets in a week, got {len}"))?;
        Ok(Self(days))
    }
}

impl<'de> Deserialize<'de> for WeekRecords {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let buckets = Vec::<Vec<UsageRecord>>::deserialize(deserializer)?;
        WeekRecords::try_from(buckets).map_err(serde::de::Error::custom)
    }
}

#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Labeled numeric series ready to be drawn. Every dataset has exactly as many points as there
/// are labels.
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    pub fn single(label: &str, labels: Vec<String>, data: Vec<f64>) -> Self {
        debug_assert_eq!(labels.len(), data.len());
        Self {
            labels,
            datasets: vec![Dataset {
                label: label.to_string(),
                data,
            }],
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.datasets.iter().all(|v| v.data.len() == self.labels.len())
    }

    /// Pairs labels with values of the first dataset.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        let data = self.datasets.first().map(|v| v.data.as_slice()).unwrap_or(&[]);
        self.labels.iter().map(String::as_str).zip(data.iter().copied())
    }
}

/// Result of most/least used reducers.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct AppUsage {
    pub application: Arc<str>,
    pub duration: u64,
}

impl AppUsage {
    /// Returned by the reducers when there are no records at all.
    pub fn sentinel(duration: u64) -> Self {
        Self {
            application: "".into(),
            duration,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.application.is_empty()
    }
}
