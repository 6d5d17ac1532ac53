use std::time::Duration;

use clap::Args;

pub const DEFAULT_DAEMON_ADDR: &str = "[::1]:12345";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Connection settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    #[arg(
        long = "addr",
        global = true,
        env = "SCREEN_TIME_ADDR",
        default_value = DEFAULT_DAEMON_ADDR,
        help = "Address of the screen time daemon"
    )]
    pub daemon_addr: String,
    #[arg(
        long = "timeout-ms",
        global = true,
        default_value_t = DEFAULT_TIMEOUT_MS,
        help = "How long a single daemon request may take"
    )]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub daemon_addr: String,
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            daemon_addr: DEFAULT_DAEMON_ADDR.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl From<ConnectionArgs> for DashboardConfig {
    fn from(value: ConnectionArgs) -> Self {
        Self {
            daemon_addr: value.daemon_addr,
            request_timeout: Duration::from_millis(value.timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::{ConnectionArgs, DashboardConfig, DEFAULT_DAEMON_ADDR};

    #[derive(Parser)]
    struct TestArgs {
        #[command(flatten)]
        connection: ConnectionArgs,
    }

    #[test]
    fn test_connection_args() {
        let args = TestArgs::parse_from(["test", "--addr", "127.0.0.1:4000", "--timeout-ms", "250"]);
        let config = DashboardConfig::from(args.connection);
        assert_eq!(config.daemon_addr, "127.0.0.1:4000");
        assert_eq!(config.request_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_defaults_match_flags() {
        let args = TestArgs::parse_from(["test"]);
        let config = DashboardConfig::from(args.connection);
        if std::env::var("SCREEN_TIME_ADDR").is_err() {
            assert_eq!(config, DashboardConfig::default());
        }
        assert_eq!(DashboardConfig::default().daemon_addr, DEFAULT_DAEMON_ADDR);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
