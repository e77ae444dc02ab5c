#![forbid(unsafe_code)]

pub mod agents;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod lint;
pub mod logging;
