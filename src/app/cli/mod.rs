//! Command-line argument parsing and configuration

pub mod args;
pub mod config;
