//! Core Elm Architecture implementation
//!
//! This module contains the core components of the Elm architecture:
//! - Messages and raw messages
//! - Application state and the update function
//! - Message translation layer
//! - The paged list controller driving data loading

pub mod cmd;
pub mod controller;
pub mod msg;
pub mod raw_msg;
pub mod state;
pub mod translator;
pub mod update;
