//! Attendance tracking and monthly payroll computation.
//!
//! This crate records employee check-ins and check-outs, derives lateness,
//! breaks and overtime from them, and turns a month of attendance, bonuses
//! and statutory rate tables into a reconciled pay stub.
//!
//! - [`service::AttendanceClock`] runs the per-employee session state machine
//! - [`service::PayrollEngine`] computes, persists and renders pay stubs
//! - [`config::ConfigLoader`] loads attendance rules and rate tables from YAML
//! - [`api::create_router`] exposes everything over HTTP

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
