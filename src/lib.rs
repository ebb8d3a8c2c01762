// src/lib.rs
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod metrics;
pub mod report;
pub mod store;
