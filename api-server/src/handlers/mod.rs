//! HTTP handlers

pub mod health;
pub mod classes;
pub mod metrics;
pub mod monitoring;
