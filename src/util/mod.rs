//! Utility modules: options, errors, logging

pub mod config;
pub mod diagnostic;
pub mod logger;
