use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};
use tracing::{debug, info, instrument};

use crate::{
    backend::{
        usage_log::{day_usage, read_usage_log, week_usage},
        DateRequest, DeleteRequest, ScreenTimeBackend,
    },
    config::DashboardConfig,
    model::{UsageRecord, WeekRecords},
};

const UPDATE_COMMAND: &str = "UPDATE_CSV";
const PATH_COMMAND: &str = "PATH";
const ALERT_SCREEN_COMMAND: &str = "ALERT_SCREEN";
const HEALTH_CHECK_COMMAND: &str = "HEALTH_CHECK";
const DELETE_COMMAND: &str = "DELETE";

/// Talks to the daemon over its socket. Every request opens a new connection, writes a single
/// command, closes the writing half and reads the answer until the daemon closes the connection.
pub struct DaemonClient {
    addr: String,
    timeout: Duration,
}

impl DaemonClient {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            addr: config.daemon_addr.clone(),
            timeout: config.request_timeout,
        }
    }

    #[instrument(skip(self), fields(addr = %self.addr))]
    async fn request(&self, command: &str) -> Result<String> {
        let exchange = async {
            let mut stream = TcpStream::connect(&self.addr)
                .await
                .with_context(|| format!("Failed to connect to daemon at {}", self.addr))?;
            stream.write_all(command.as_bytes()).await?;
            stream.shutdown().await?;
            let mut received = String::new();
            stream.read_to_string(&mut received).await?;
            anyhow::Ok(received)
        };
        let received = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| anyhow!("Daemon didn't answer {command} in {:?}", self.timeout))??;
        debug!("Daemon answered {command} with {received:?}");
        Ok(received)
    }

    /// Location of the usage log the daemon is currently writing into.
    pub async fn usage_log_path(&self) -> Result<PathBuf> {
        let path = self.request(PATH_COMMAND).await?;
        let path = path.trim();
        if path.is_empty() {
            bail!("Daemon returned an empty usage log path");
        }
        Ok(PathBuf::from(path))
    }

    async fn usage_log(&self) -> Result<Vec<UsageRecord>> {
        let path = self.usage_log_path().await?;
        read_usage_log(&path).await
    }
}

#[async_trait]
impl ScreenTimeBackend for DaemonClient {
    async fn get_date_screen_time(&self, request: DateRequest) -> Result<Vec<UsageRecord>> {
        let records = self.usage_log().await?;
        Ok(day_usage(&records, request.start_of_date))
    }

    async fn get_week_screen_time(&self, request: DateRequest) -> Result<WeekRecords> {
        let records = self.usage_log().await?;
        Ok(week_usage(&records, request.start_of_date))
    }

    async fn send_update_socket_message(&self) -> Result<()> {
        let answer = self.request(UPDATE_COMMAND).await?;
        info!("Requested usage log update: {}", answer.trim());
        Ok(())
    }

    async fn send_get_alert_screen_time_message(&self) -> Result<u64> {
        let answer = self.request(ALERT_SCREEN_COMMAND).await?;
        answer
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Daemon returned invalid alert screen time {answer:?}"))
    }

    async fn send_delete_months_data_message(&self, request: DeleteRequest) -> Result<()> {
        let answer = self
            .request(&format!("{DELETE_COMMAND} {}", request.months))
            .await?;
        match answer.trim() {
            "Success" => Ok(()),
            "Failure" => Err(anyhow!("Failed to delete data")),
            other => Err(anyhow!("Unknown response {other:?}")),
        }
    }

    async fn send_get_health_check_message(&self) -> Result<String> {
        let answer = self.request(HEALTH_CHECK_COMMAND).await?;
        Ok(answer.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use anyhow::Result;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::DaemonClient;
    use crate::{
        backend::{DateRequest, DeleteRequest, ScreenTimeBackend},
        config::DashboardConfig,
        utils::logging::TEST_LOGGING,
    };

    /// Accepts `connections` connections, answering each command with `respond` and returning
    /// every command it received.
    async fn fake_daemon(
        connections: usize,
        respond: impl Fn(&str) -> String + Send + 'static,
    ) -> Result<(String, JoinHandle<Vec<String>>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?.to_string();
        let handle = tokio::spawn(async move {
            let mut received = vec![];
            for _ in 0..connections {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut command = String::new();
                stream.read_to_string(&mut command).await.unwrap();
                stream
                    .write_all(respond(&command).as_bytes())
                    .await
                    .unwrap();
                received.push(command);
            }
            received
        });
        Ok((addr, handle))
    }

    fn client(addr: String) -> DaemonClient {
        DaemonClient::new(&DashboardConfig {
            daemon_addr: addr,
            ..DashboardConfig::default()
        })
    }

    #[tokio::test]
    async fn test_alert_screen_time() -> Result<()> {
        *TEST_LOGGING;
        let (addr, daemon) = fake_daemon(1, |_| "45\n".into()).await?;
        let alert = client(addr).send_get_alert_screen_time_message().await?;
        assert_eq!(alert, 45);
        assert_eq!(daemon.await?, vec!["ALERT_SCREEN"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_months() -> Result<()> {
        let (addr, daemon) = fake_daemon(3, |command| match command {
            "DELETE 3" => "Success".into(),
            "DELETE 4" => "Failure".into(),
            _ => "What".into(),
        })
        .await?;
        let client = client(addr);
        let months = |v| DeleteRequest {
            months: NonZeroU32::new(v).unwrap(),
        };

        client.send_delete_months_data_message(months(3)).await?;
        let failure = client
            .send_delete_months_data_message(months(4))
            .await
            .unwrap_err();
        assert_eq!(failure.to_string(), "Failed to delete data");
        assert!(client
            .send_delete_months_data_message(months(5))
            .await
            .is_err());

        assert_eq!(daemon.await?, vec!["DELETE 3", "DELETE 4", "DELETE 5"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_date_screen_time_reads_reported_log() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let log = dir.path().join("screen_time_data.csv");
        std::fs::write(
            &log,
            "timestamp,application,duration\n\
             1706054500,firefox,120\n\
             1706054600,firefox,60\n\
             1706141000,firefox,999\n",
        )?;
        let path = log.to_string_lossy().to_string();
        let (addr, daemon) = fake_daemon(2, move |_| path.clone()).await?;
        let client = client(addr);

        let day = client
            .get_date_screen_time(DateRequest {
                start_of_date: 1706054400,
            })
            .await?;
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].duration, 180);

        let week = client
            .get_week_screen_time(DateRequest {
                start_of_date: 1706054400,
            })
            .await?;
        assert_eq!(week.days()[0][0].duration, 180);
        assert_eq!(week.days()[1][0].duration, 999);

        assert_eq!(daemon.await?, vec!["PATH", "PATH"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_daemon() -> Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?.to_string();
        drop(listener);

        assert!(client(addr).send_update_socket_message().await.is_err());
        Ok(())
    }
}
