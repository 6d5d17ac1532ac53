//! Contract between the dashboard and the daemon that actually records screen time.
//! [ScreenTimeBackend] names the operations the dashboard relies on. [client::DaemonClient] is the
//! implementation used by the binary.

pub mod client;
pub mod usage_log;

use std::{fmt::Display, num::NonZeroU32};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{UsageRecord, WeekRecords};

/// Named operations understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetDateScreenTime,
    GetWeekScreenTime,
    SendUpdateSocketMessage,
    SendGetAlertScreenTimeMessage,
    SendDeleteMonthsDataMessage,
    SendGetHealthCheckMessage,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetDateScreenTime => "get_date_screen_time",
            Operation::GetWeekScreenTime => "get_week_screen_time",
            Operation::SendUpdateSocketMessage => "send_update_socket_message",
            Operation::SendGetAlertScreenTimeMessage => "send_get_alert_screen_time_message",
            Operation::SendDeleteMonthsDataMessage => "send_delete_months_data_message",
            Operation::SendGetHealthCheckMessage => "send_get_health_check_message",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Payload of day and week requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRequest {
    /// Local midnight of the requested day (or of the Sunday starting the week), in epoch seconds.
    pub start_of_date: i64,
}

/// Payload of a request to delete the oldest `months` of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub months: NonZeroU32,
}

/// Every call is a single attempt. Retrying, if needed, is up to the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScreenTimeBackend: Send + Sync {
    /// Per application usage for a calendar day.
    async fn get_date_screen_time(&self, request: DateRequest) -> Result<Vec<UsageRecord>>;

    /// Per application usage for 7 days starting at `request.start_of_date`.
    async fn get_week_screen_time(&self, request: DateRequest) -> Result<WeekRecords>;

    /// Asks the daemon to flush collected data so subsequent reads are fresh.
    async fn send_update_socket_message(&self) -> Result<()>;

    async fn send_get_alert_screen_time_message(&self) -> Result<u64>;

    async fn send_delete_months_data_message(&self, request: DeleteRequest) -> Result<()>;

    async fn send_get_health_check_message(&self) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::{DateRequest, DeleteRequest, Operation};

    #[test]
    fn test_payload_shapes() {
        assert_eq!(
            serde_json::to_string(&DateRequest {
                start_of_date: 1706054400
            })
            .unwrap(),
            r#"{"start_of_date":1706054400}"#
        );
        assert_eq!(
            serde_json::to_string(&DeleteRequest {
                months: NonZeroU32::new(3).unwrap()
            })
            .unwrap(),
            r#"{"months":3}"#
        );
        assert!(serde_json::from_str::<DeleteRequest>(r#"{"months":0}"#).is_err());
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::GetDateScreenTime.to_string(), "get_date_screen_time");
        assert_eq!(
            Operation::SendDeleteMonthsDataMessage.name(),
            "send_delete_months_data_message"
        );
    }
}
