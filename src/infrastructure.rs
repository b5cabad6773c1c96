//! Infrastructure layer
//!
//! This module handles external integrations and services:
//! - TUI foundation
//! - CLI argument processing
//! - Configuration loading
//! - HTTP and in-process data sources
//! - The mock paging server

pub mod cli;
pub mod config;
pub mod http_source;
pub mod mock_source;
pub mod server;
pub mod tui;
