//! Integration layer
//!
//! Wires terminal events, the Elm update cycle and the list controller
//! together.

pub mod app_runner;
