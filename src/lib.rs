//! Terminal dashboard for a screen time tracking daemon. Shows today's and this week's usage per
//! application, lets you browse past days and weeks, and manage data kept by the daemon.
//!

pub mod aggregation;
pub mod backend;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod tui;
pub mod utils;
