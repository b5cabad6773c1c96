//! Presentation layer
//!
//! This module contains UI components and widgets:
//! - Stateless components rendering the restaurant screen
//! - Reusable widgets
//! - Configuration (keybindings)

pub mod components;
pub mod config;
pub mod widgets;
