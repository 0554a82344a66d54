//! Attendance Tracker - single-school attendance service
//!
//! Classes, students, teachers and daily attendance logs stored through
//! SeaORM, a dashboard with chart-ready aggregates, and attendance reports
//! rendered as JSON, PDF or CSV.
//!
//! # Architecture
//! - `storage`: SeaORM backend, models and retry helpers
//! - `services`: business rules shared by the HTTP API and the CLI
//! - `report`: report assembly, PDF layout and CSV output
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: CLI commands
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod report;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
