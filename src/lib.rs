#![forbid(unsafe_code)]

//! `lc-herald` — Discord bot that publishes LeetCode question summaries
//! into deduplicated, time-windowed discussion threads.

pub mod catalog;
pub mod compose;
pub mod config;
pub mod discord;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod publish;
pub mod remote;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
