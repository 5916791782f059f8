//! GitHub Copilot usage metrics: fetch, index by date, aggregate, display

pub mod cli;
pub mod config;
pub mod logging;
pub mod services;
pub mod tui;
pub mod types;
