//! Terminal front end of the dashboard.

mod icons;
mod input;
mod theme;
mod ui;

use std::{io, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    backend::ScreenTimeBackend,
    dashboard::{driver::spawn_effects, Dashboard},
};

pub type Terminal = ratatui::Terminal<CrosstermBackend<io::Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Enters raw mode and the alternate screen.
pub fn init() -> Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = ratatui::Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Runs the dashboard until the user quits. The terminal is restored even if the loop fails.
pub async fn run_dashboard(
    mut dashboard: Dashboard,
    backend: Arc<dyn ScreenTimeBackend>,
) -> Result<()> {
    let mut terminal = init().context("Failed to set up the terminal")?;
    let result = event_loop(&mut terminal, &mut dashboard, backend).await;
    if let Err(e) = restore() {
        error!("Failed to restore the terminal {e:?}");
    }
    result
}

async fn event_loop(
    terminal: &mut Terminal,
    dashboard: &mut Dashboard,
    backend: Arc<dyn ScreenTimeBackend>,
) -> Result<()> {
    let (sender, mut completions) = mpsc::unbounded_channel();
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK_RATE);

    let mut chart_version = dashboard.chart().version();

    info!("Dashboard started");
    while dashboard.running {
        spawn_effects(dashboard, &backend, &sender);
        if dashboard.chart().version() != chart_version {
            chart_version = dashboard.chart().version();
            debug!("Charts rebuilt, version {chart_version}");
        }
        terminal.draw(|frame| ui::draw(frame, dashboard))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    input::handle_key(dashboard, key);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal events"),
                None => dashboard.running = false,
            },
            Some(completion) = completions.recv() => dashboard.apply(completion),
            _ = tick.tick() => {}
        }
    }
    info!("Dashboard closed");
    Ok(())
}
