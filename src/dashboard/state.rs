use std::{collections::VecDeque, num::NonZeroU32};

use chrono::{DateTime, Duration, Local, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::{
    aggregation::{build_day_chart_series, build_week_chart_series},
    backend::{DateRequest, DeleteRequest},
    model::{ChartSeries, UsageRecord, WeekRecords},
    utils::{
        clock::Clock,
        time::{previous_or_current_sunday, shift_weeks, start_of_date_secs},
    },
};

use super::{
    ChartKind, ChartState, Completion, DeleteOutcome, DeleteState, Effect, RequestSlot, Tab,
};

/// The top-level dashboard state.
pub struct Dashboard {
    clock: Box<dyn Clock>,
    pub running: bool,
    pub tab: Tab,
    selected_date: NaiveDate,
    week_start: Option<DateTime<Local>>,
    day_records: Vec<UsageRecord>,
    week_records: WeekRecords,
    day_chart: ChartSeries,
    week_chart: ChartSeries,
    chart: ChartState,
    alert_screen_time: u64,
    delete_months: NonZeroU32,
    delete_input: String,
    delete_state: DeleteState,
    delete_outcome: Option<DeleteOutcome>,
    last_error: Option<String>,
    refreshed: bool,
    day_slot: RequestSlot,
    week_slot: RequestSlot,
    effects: VecDeque<Effect>,
}

impl Dashboard {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        let selected_date = clock.today();
        Self {
            clock,
            running: true,
            tab: Tab::Day,
            selected_date,
            week_start: None,
            day_records: vec![],
            week_records: WeekRecords::default(),
            day_chart: build_day_chart_series(&[]),
            week_chart: build_week_chart_series(&WeekRecords::default()),
            chart: ChartState::default(),
            alert_screen_time: 0,
            delete_months: NonZeroU32::MIN,
            delete_input: NonZeroU32::MIN.to_string(),
            delete_state: DeleteState::Idle,
            delete_outcome: None,
            last_error: None,
            refreshed: false,
            day_slot: RequestSlot::default(),
            week_slot: RequestSlot::default(),
            effects: VecDeque::new(),
        }
    }

    /// Seeds the week view and asks for a refresh. Day and week data are requested only once the
    /// refresh finishes, so the first paint shows fresh data.
    pub fn mount(&mut self) {
        self.week_start = Some(previous_or_current_sunday(&self.clock.now()));
        self.effects.push_back(Effect::Refresh);
        self.effects.push_back(Effect::FetchAlert);
    }

    /// Removes every queued effect.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        self.effects.drain(..).collect()
    }

    pub fn has_pending_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn week_start(&self) -> Option<DateTime<Local>> {
        self.week_start
    }

    pub fn day_records(&self) -> &[UsageRecord] {
        &self.day_records
    }

    pub fn week_records(&self) -> &WeekRecords {
        &self.week_records
    }

    pub fn day_chart(&self) -> &ChartSeries {
        &self.day_chart
    }

    pub fn week_chart(&self) -> &ChartSeries {
        &self.week_chart
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn alert_screen_time(&self) -> u64 {
        self.alert_screen_time
    }

    pub fn delete_months(&self) -> NonZeroU32 {
        self.delete_months
    }

    pub fn delete_input(&self) -> &str {
        &self.delete_input
    }

    pub fn delete_state(&self) -> DeleteState {
        self.delete_state
    }

    pub fn delete_outcome(&self) -> Option<&DeleteOutcome> {
        self.delete_outcome.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Picks a day to show. Future days are clamped to today.
    pub fn select_date(&mut self, date: NaiveDate) {
        let date = date.min(self.clock.today());
        if date == self.selected_date {
            return;
        }
        self.selected_date = date;
        self.queue_day_fetch();
    }

    pub fn next_day(&mut self) {
        self.select_date(self.selected_date + Duration::days(1));
    }

    pub fn previous_day(&mut self) {
        self.select_date(self.selected_date - Duration::days(1));
    }

    pub fn advance_week(&mut self) {
        self.move_week(1);
    }

    pub fn retreat_week(&mut self) {
        self.move_week(-1);
    }

    fn move_week(&mut self, weeks: i64) {
        let Some(week_start) = self.week_start.as_ref() else {
            return;
        };
        self.week_start = Some(shift_weeks(week_start, weeks));
        self.queue_week_fetch();
    }

    /// Replaces the month count. Accepts only positive integers, anything else leaves the count
    /// and the input as they are and returns `false`.
    pub fn set_delete_months_input(&mut self, input: &str) -> bool {
        match input.trim().parse::<NonZeroU32>() {
            Ok(months) => {
                self.delete_months = months;
                self.delete_input = months.to_string();
                true
            }
            Err(_) => {
                debug!("Rejected month count input {input:?}");
                false
            }
        }
    }

    /// Appends a digit to the month count being typed. Returns whether the input is now a valid
    /// count. Digits that would overflow the count are dropped.
    pub fn push_delete_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() {
            return false;
        }
        let mut input = self.delete_input.clone();
        input.push(digit);
        if input.parse::<u32>().is_err() {
            debug!("Month count input {input:?} is too long");
            return self.delete_input_months().is_some();
        }
        self.delete_input = input;
        self.sync_delete_months()
    }

    /// Removes the last typed digit. The input may become empty.
    pub fn pop_delete_digit(&mut self) -> bool {
        self.delete_input.pop();
        self.sync_delete_months()
    }

    /// Month count the current input stands for, if it's a positive integer.
    pub fn delete_input_months(&self) -> Option<NonZeroU32> {
        self.delete_input.parse().ok()
    }

    fn sync_delete_months(&mut self) -> bool {
        match self.delete_input_months() {
            Some(months) => {
                self.delete_months = months;
                true
            }
            None => false,
        }
    }

    /// Opens the confirmation only while the typed month count is valid.
    pub fn open_delete_dialog(&mut self) {
        if self.delete_state != DeleteState::Idle {
            return;
        }
        if self.delete_input_months().is_none() {
            debug!("Not opening delete dialog for input {:?}", self.delete_input);
            return;
        }
        self.delete_state = DeleteState::PendingConfirmation;
    }

    pub fn cancel_delete_dialog(&mut self) {
        if self.delete_state == DeleteState::PendingConfirmation {
            self.delete_state = DeleteState::Idle;
        }
    }

    /// Sends exactly one delete request. Confirming while a request is in flight does nothing.
    pub fn confirm_delete(&mut self) {
        if self.delete_state != DeleteState::PendingConfirmation {
            debug!("Ignoring delete confirmation in state {:?}", self.delete_state);
            return;
        }
        self.delete_state = DeleteState::Deleting;
        self.delete_outcome = None;
        info!("Requesting deletion of the oldest {} months", self.delete_months);
        self.effects.push_back(Effect::DeleteMonths(DeleteRequest {
            months: self.delete_months,
        }));
    }

    /// Applies the result of an executed [Effect]. Failures keep whatever was displayed before.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Refresh(result) => {
                if let Err(e) = result {
                    error!("Error updating screen time {e:?}");
                }
                self.refreshed = true;
                self.queue_week_fetch();
                self.queue_day_fetch();
            }
            Completion::Day { request_id, result } => {
                if !self.day_slot.is_latest(request_id) {
                    warn!("Discarding superseded day response {request_id}");
                    return;
                }
                match result {
                    Ok(records) => {
                        self.day_chart = build_day_chart_series(&records);
                        self.day_records = records;
                        self.chart.reset(ChartKind::Day);
                        self.last_error = None;
                    }
                    Err(e) => {
                        error!("Error fetching screen time {e:?}");
                        self.last_error = Some(format!("{e:#}"));
                    }
                }
            }
            Completion::Week { request_id, result } => {
                if !self.week_slot.is_latest(request_id) {
                    warn!("Discarding superseded week response {request_id}");
                    return;
                }
                match result {
                    Ok(records) => {
                        self.week_chart = build_week_chart_series(&records);
                        self.week_records = records;
                        self.chart.reset(ChartKind::Week);
                        self.last_error = None;
                    }
                    Err(e) => {
                        error!("Error fetching screen time {e:?}");
                        self.last_error = Some(format!("{e:#}"));
                    }
                }
            }
            Completion::Alert(result) => match result {
                Ok(v) => self.alert_screen_time = v,
                Err(e) => error!("Error fetching alert screen time {e:?}"),
            },
            Completion::Delete(result) => {
                self.delete_state = DeleteState::Idle;
                self.delete_outcome = Some(match result {
                    Ok(()) => DeleteOutcome::Sent,
                    Err(e) => {
                        error!("Error deleting old data {e:?}");
                        let text = e.to_string();
                        DeleteOutcome::Failed(serde_json::to_string(&text).unwrap_or(text))
                    }
                });
            }
        }
    }

    fn queue_day_fetch(&mut self) {
        if !self.refreshed {
            return;
        }
        let request_id = self.day_slot.issue();
        self.effects.push_back(Effect::FetchDay {
            request_id,
            request: DateRequest {
                start_of_date: start_of_date_secs(self.selected_date),
            },
        });
    }

    fn queue_week_fetch(&mut self) {
        let Some(week_start) = self.week_start.as_ref() else {
            return;
        };
        if !self.refreshed {
            return;
        }
        let request_id = self.week_slot.issue();
        self.effects.push_back(Effect::FetchWeek {
            request_id,
            request: DateRequest {
                start_of_date: week_start.timestamp(),
            },
        });
    }
}
