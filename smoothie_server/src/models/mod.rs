//! Smoothie data models.

pub mod catalog;
pub mod order;
