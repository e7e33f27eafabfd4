//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the attendance rules and the
//! statutory rate catalog (contributions, tax brackets, overtime bands) from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Standard day: {} hours", config.attendance().workday_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceConfig, CappedContributionRate, ContributionsConfig, FlatContributionRate,
    OvertimeBand, OvertimeBandsConfig, RateCatalog, TaxBracket, TaxBracketsConfig,
};
