pub mod date_arg;
pub mod report;

use std::{num::NonZeroU32, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use date_arg::{resolve_date, DateArgs};
use tracing::level_filters::LevelFilter;

use crate::{
    backend::{client::DaemonClient, DateRequest, ScreenTimeBackend},
    config::{ConnectionArgs, DashboardConfig},
    dashboard::{driver::settle, Dashboard, DeleteOutcome, DELETE_SENT_MESSAGE},
    tui::run_dashboard,
    utils::{
        clock::DefaultClock,
        dir::create_application_default_path,
        logging::enable_logging,
        time::{local_midnight, previous_or_current_sunday, start_of_date_secs},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Screentime", version, long_about = None)]
#[command(about = "Dashboard for the screen time tracking daemon", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Option<Commands>,
    #[command(flatten)]
    connection: ConnectionArgs,
    #[arg(long, global = true, help = "Log everything, mirroring logs to stdout outside of the dashboard")]
    log: bool,
    #[arg(
        long = "log-dir",
        global = true,
        help = "Directory for log files. By default $XDG_STATE_HOME/screentime/logs or $HOME/.local/state/screentime/logs"
    )]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Open the interactive dashboard. This is the default")]
    Dashboard,
    #[command(about = "Print screen time of a single day")]
    Day {
        #[command(flatten)]
        date: DateArgs,
    },
    #[command(about = "Print screen time of the week (Sunday to Saturday) containing a day")]
    Week {
        #[command(flatten)]
        date: DateArgs,
    },
    #[command(about = "Print the screen time alert threshold configured in the daemon")]
    Alert,
    #[command(about = "Ask the daemon to flush collected data into its usage log")]
    Refresh,
    #[command(about = "Delete the oldest months of recorded data")]
    Delete {
        #[arg(long, short, help = "Number of oldest months to delete")]
        months: NonZeroU32,
        #[arg(long, help = "Skip the confirmation and send the request")]
        yes: bool,
    },
    #[command(about = "Check that the daemon is reachable")]
    Health,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();
    let commands = args.commands.unwrap_or(Commands::Dashboard);
    let interactive = matches!(commands, Commands::Dashboard);

    let log_dir = match args.log_dir {
        Some(v) => v,
        None => create_application_default_path()?.join("logs"),
    };
    let logging_level = args.log.then_some(LevelFilter::TRACE);
    enable_logging(&log_dir, logging_level, args.log && !interactive)?;

    let config = DashboardConfig::from(args.connection);
    let backend: Arc<dyn ScreenTimeBackend> = Arc::new(DaemonClient::new(&config));

    match commands {
        Commands::Dashboard => {
            let mut dashboard = Dashboard::new(Box::new(DefaultClock));
            dashboard.mount();
            run_dashboard(dashboard, backend).await
        }
        Commands::Day { date } => {
            let date = resolve_date(date, &DefaultClock)?;
            let records = backend
                .get_date_screen_time(DateRequest {
                    start_of_date: start_of_date_secs(date),
                })
                .await
                .context("Failed to fetch day screen time")?;
            report::print_day(date, &records);
            Ok(())
        }
        Commands::Week { date } => {
            let date = resolve_date(date, &DefaultClock)?;
            let week_start = previous_or_current_sunday(&local_midnight(&Local, date));
            let week = backend
                .get_week_screen_time(DateRequest {
                    start_of_date: week_start.timestamp(),
                })
                .await
                .context("Failed to fetch week screen time")?;
            report::print_week(week_start.date_naive(), &week);
            Ok(())
        }
        Commands::Alert => {
            let alert = backend
                .send_get_alert_screen_time_message()
                .await
                .context("Failed to fetch alert screen time")?;
            println!("Current Screen Time Alert: {alert}");
            Ok(())
        }
        Commands::Refresh => {
            backend
                .send_update_socket_message()
                .await
                .context("Failed to update screen time")?;
            println!("Update requested");
            Ok(())
        }
        Commands::Delete { months, yes } => delete_months(backend.as_ref(), months, yes).await,
        Commands::Health => {
            let answer = backend
                .send_get_health_check_message()
                .await
                .context("Daemon is unreachable")?;
            println!("{answer}");
            Ok(())
        }
    }
}

/// Runs the same confirmation flow the dashboard uses.
async fn delete_months(
    backend: &dyn ScreenTimeBackend,
    months: NonZeroU32,
    yes: bool,
) -> Result<()> {
    if !yes {
        println!("{}", report::delete_warning(months));
        println!("Re-run with --yes to proceed.");
        return Ok(());
    }

    let mut dashboard = Dashboard::new(Box::new(DefaultClock));
    dashboard.set_delete_months_input(&months.to_string());
    dashboard.open_delete_dialog();
    dashboard.confirm_delete();
    settle(&mut dashboard, backend).await;

    match dashboard.delete_outcome() {
        Some(DeleteOutcome::Sent) => {
            println!("{DELETE_SENT_MESSAGE}");
            Ok(())
        }
        Some(outcome) => bail!("{}", outcome.message()),
        None => bail!("Delete request wasn't sent"),
    }
}
