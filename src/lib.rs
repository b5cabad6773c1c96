//! # Dishlist - infinite-scroll dish list in the terminal
//!
//! A column of restaurant cards, each with its own horizontally scrolling,
//! paginated dish list, built with Ratatui, plus the mock paging server
//! they talk to.
//!
//! ## Architecture Overview
//!
//! Each card's loading is driven by its own
//! [`core::controller::PagedListController`], which owns a pure paging state machine ([`model::paged_list::PagedList`]) and
//! fetches pages from any [`domain::source::DataSource`]. The screen around
//! it follows the Elm architecture:
//!
//! - **Model** (`core::state`): application state
//! - **Message** (`core::msg`): events that can change the state
//! - **Update** (`core::update`): pure functions that transform state
//! - **Command** (`core::cmd`): side effects run by the app runner
//! - **View** (`presentation::components`): rendering from state
//!
//! ## Example Usage
//!
//! ```rust
//! use dishlist::core::{msg::Msg, state::AppState, update::update, cmd::Cmd};
//!
//! // two restaurant cards, the second one focused
//! let mut state = AppState::with_lists(2, 2);
//! state.lists[1].item_count = 10;
//! state.focused_card = 1;
//!
//! let (state, commands) = update(Msg::ScrollToEnd, state);
//! assert_eq!(state.lists[1].selected_index, Some(9));
//! assert_eq!(commands, vec![Cmd::RequestMore { card: 1 }]);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Elm architecture and the list controller
//! - [`domain`] - dish items, page types and the data source seam
//! - [`model`] - paging and timing state machines
//! - [`infrastructure`] - terminal, CLI, config, HTTP and the mock server
//! - [`integration`] - the app runner
//! - [`presentation`] - components and widgets
//! - [`perf`] - performance reports and live probing

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod model;
pub mod perf;
pub mod presentation;
pub mod utils;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
