//! HTTP API module for the payroll engine.
//!
//! This module provides REST endpoints over the attendance clock, the payroll
//! engine and the compensation service.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CheckInRequest, CheckOutRequest, DailyQuery, ReportQuery};
pub use response::ApiError;
pub use state::AppState;
