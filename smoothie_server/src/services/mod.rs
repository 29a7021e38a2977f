//! Order service business logic.

pub mod catalog_service;
pub mod nutrition_service;
pub mod order_service;
