//! Domain logic
//!
//! This module contains domain-specific business logic:
//! - Dish items and the paging wire types
//! - The data source seam of the list controller
//! - The mock catalog served by the demo server
//! - Text processing utilities

pub mod catalog;
pub mod dish;
pub mod fallback;
pub mod page;
pub mod source;
pub mod text;
