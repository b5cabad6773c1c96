//! Performance reporting
//!
//! - Report formatting and before/after comparison
//! - Live probing of a running list server

pub mod monitor;
pub mod report;
