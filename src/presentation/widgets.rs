//! Reusable UI widgets

pub mod dish_card;
