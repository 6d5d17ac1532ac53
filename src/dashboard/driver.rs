use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info_span, Instrument};

use crate::backend::{Operation, ScreenTimeBackend};

use super::{Completion, Dashboard, Effect};

impl Effect {
    pub fn operation(&self) -> Operation {
        match self {
            Effect::Refresh => Operation::SendUpdateSocketMessage,
            Effect::FetchDay { .. } => Operation::GetDateScreenTime,
            Effect::FetchWeek { .. } => Operation::GetWeekScreenTime,
            Effect::FetchAlert => Operation::SendGetAlertScreenTimeMessage,
            Effect::DeleteMonths(_) => Operation::SendDeleteMonthsDataMessage,
        }
    }
}

/// Issues the backend call behind an effect. Exactly one attempt is made.
pub async fn execute(backend: &dyn ScreenTimeBackend, effect: Effect) -> Completion {
    let span = info_span!("backend", operation = %effect.operation());
    async move {
        debug!("Executing {effect:?}");
        match effect {
            Effect::Refresh => Completion::Refresh(backend.send_update_socket_message().await),
            Effect::FetchDay {
                request_id,
                request,
            } => Completion::Day {
                request_id,
                result: backend.get_date_screen_time(request).await,
            },
            Effect::FetchWeek {
                request_id,
                request,
            } => Completion::Week {
                request_id,
                result: backend.get_week_screen_time(request).await,
            },
            Effect::FetchAlert => {
                Completion::Alert(backend.send_get_alert_screen_time_message().await)
            }
            Effect::DeleteMonths(request) => {
                Completion::Delete(backend.send_delete_months_data_message(request).await)
            }
        }
    }
    .instrument(span)
    .await
}

/// Executes queued effects one after another, including the ones queued by their completions,
/// until nothing is left.
pub async fn settle(dashboard: &mut Dashboard, backend: &dyn ScreenTimeBackend) {
    loop {
        let effects = dashboard.take_effects();
        if effects.is_empty() {
            return;
        }
        for effect in effects {
            let completion = execute(backend, effect).await;
            dashboard.apply(completion);
        }
    }
}

/// Runs every queued effect as its own task. Completions are delivered through `completions` in
/// the order they finish.
pub fn spawn_effects(
    dashboard: &mut Dashboard,
    backend: &Arc<dyn ScreenTimeBackend>,
    completions: &mpsc::UnboundedSender<Completion>,
) {
    for effect in dashboard.take_effects() {
        let backend = backend.clone();
        let completions = completions.clone();
        tokio::spawn(async move {
            let completion = execute(backend.as_ref(), effect).await;
            // The receiver is only gone once the dashboard is closing.
            let _ = completions.send(completion);
        });
    }
}
