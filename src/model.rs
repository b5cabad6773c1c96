//! Elm-style state machines
//!
//! Each model owns its state and changes only through `update(message)`.

pub mod paged_list;
pub mod performance;
