//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendance
//! rules and the statutory rate catalog from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AttendanceConfig, ContributionsConfig, OvertimeBandsConfig, RateCatalog, TaxBracketsConfig,
};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── attendance.yaml      # Workday start, standard hours, break rules
/// ├── contributions.yaml   # Capped and flat social contributions
/// ├── tax_brackets.yaml    # Progressive tax table, in table order
/// └── overtime_bands.yaml  # Overtime hour bands and premiums
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Workday starts at {}", loader.attendance().workday_start);
/// println!("{} tax brackets", loader.rate_catalog().tax_brackets().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    attendance: AttendanceConfig,
    rate_catalog: RateCatalog,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The attendance rules fail [`AttendanceConfig::validate`] (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let attendance_path = path.join("attendance.yaml");
        let attendance = Self::load_yaml::<AttendanceConfig>(&attendance_path)?;
        attendance
            .validate()
            .map_err(|e| EngineError::ConfigParseError {
                path: attendance_path.display().to_string(),
                message: e.to_string(),
            })?;
        let contributions =
            Self::load_yaml::<ContributionsConfig>(&path.join("contributions.yaml"))?;
        let brackets = Self::load_yaml::<TaxBracketsConfig>(&path.join("tax_brackets.yaml"))?;
        let bands = Self::load_yaml::<OvertimeBandsConfig>(&path.join("overtime_bands.yaml"))?;

        let rate_catalog = RateCatalog::new(
            contributions.capped_contribution,
            contributions.flat_contribution,
            brackets.tax_brackets,
            bands.overtime_bands,
        );

        tracing::debug!(
            path = %path.display(),
            tax_brackets = rate_catalog.tax_brackets().len(),
            overtime_bands = rate_catalog.overtime_bands().len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            attendance,
            rate_catalog,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the attendance rules.
    pub fn attendance(&self) -> &AttendanceConfig {
        &self.attendance
    }

    /// Returns the rate catalog snapshot.
    pub fn rate_catalog(&self) -> &RateCatalog {
        &self.rate_catalog
    }
}
