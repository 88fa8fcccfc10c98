//! Core engine for the recruitment portal: job postings, schema-driven
//! application forms, candidate validation, and submission assembly.

pub mod config;
pub mod error;
pub mod forms;
pub mod jobs;
pub mod telemetry;
