//! The dashboard controller. [Dashboard] owns every piece of UI state and only changes in response
//! to user actions or to [Completion]s of backend calls. State changes that need data from the
//! backend don't call it directly, they queue an [Effect] that is executed by [driver].

pub mod driver;
mod state;

use std::fmt::Display;

use anyhow::Result;

use crate::{
    backend::{DateRequest, DeleteRequest},
    model::{UsageRecord, WeekRecords},
};

pub use state::Dashboard;

pub const DELETE_SENT_MESSAGE: &str = "Delete Request Sent.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Day,
    Week,
    Other,
}

pub const TABS: [Tab; 3] = [Tab::Day, Tab::Week, Tab::Other];

impl Tab {
    pub fn index(&self) -> usize {
        match self {
            Tab::Day => 0,
            Tab::Week => 1,
            Tab::Other => 2,
        }
    }

    pub fn next(&self) -> Tab {
        TABS[(self.index() + 1) % TABS.len()]
    }

    pub fn previous(&self) -> Tab {
        TABS[(self.index() + TABS.len() - 1) % TABS.len()]
    }
}

impl Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Day => write!(f, "Day"),
            Tab::Week => write!(f, "Week"),
            Tab::Other => write!(f, "Other"),
        }
    }
}

/// Identifies a fetch inside its slot. Only the latest issued id of a slot is accepted.
pub type RequestId = u64;

/// Backend work requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Refresh,
    FetchDay {
        request_id: RequestId,
        request: DateRequest,
    },
    FetchWeek {
        request_id: RequestId,
        request: DateRequest,
    },
    FetchAlert,
    DeleteMonths(DeleteRequest),
}

/// Result of an executed [Effect].
#[derive(Debug)]
pub enum Completion {
    Refresh(Result<()>),
    Day {
        request_id: RequestId,
        result: Result<Vec<UsageRecord>>,
    },
    Week {
        request_id: RequestId,
        result: Result<WeekRecords>,
    },
    Alert(Result<u64>),
    Delete(Result<()>),
}

/// States of the delete-old-data flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    PendingConfirmation,
    Deleting,
}

/// What the last finished delete request ended with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Sent,
    /// Error serialized as a JSON string
    Failed(String),
}

impl DeleteOutcome {
    pub fn message(&self) -> &str {
        match self {
            DeleteOutcome::Sent => DELETE_SENT_MESSAGE,
            DeleteOutcome::Failed(text) => text,
        }
    }
}

/// Issues monotonically increasing ids for one kind of fetch, so that a response to a superseded
/// request can't overwrite a newer one.
#[derive(Debug, Default)]
pub struct RequestSlot {
    latest: RequestId,
}

impl RequestSlot {
    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest == id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Day,
    Week,
}

/// Gates charts. Each chart stays hidden until its first series arrives. Every new series of
/// either chart bumps the version.
#[derive(Debug, Default)]
pub struct ChartState {
    day_ready: bool,
    week_ready: bool,
    version: u64,
}

impl ChartState {
    pub fn reset(&mut self, kind: ChartKind) {
        self.version += 1;
        match kind {
            ChartKind::Day => self.day_ready = true,
            ChartKind::Week => self.week_ready = true,
        }
    }

    pub fn is_ready(&self, kind: ChartKind) -> bool {
        match kind {
            ChartKind::Day => self.day_ready,
            ChartKind::Week => self.week_ready,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
