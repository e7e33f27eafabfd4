//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{AttendanceConfig, ConfigLoader};
use crate::models::Employee;
use crate::service::{
    AttendanceClock, CompensationService, NoopRenderer, PayStubRenderer, PayrollEngine,
    RegenerationPolicy,
};
use crate::store::{
    InMemoryCompensationStore, InMemoryEmployeeDirectory, InMemoryPayStubStore,
    InMemoryRateCatalog, InMemoryTimeEntryStore,
};

/// Shared application state.
///
/// Holds the attendance rules loaded at startup and the services, wired over
/// in-memory stores.
#[derive(Clone)]
pub struct AppState {
    attendance: Arc<AttendanceConfig>,
    rates: Arc<InMemoryRateCatalog>,
    clock: AttendanceClock,
    payroll: PayrollEngine,
    compensation: CompensationService,
}

impl AppState {
    /// Creates state over in-memory stores with no document rendering.
    pub fn new(config: ConfigLoader, employees: impl IntoIterator<Item = Employee>) -> Self {
        Self::with_renderer(
            config,
            employees,
            Arc::new(NoopRenderer),
            RegenerationPolicy::default(),
        )
    }

    /// Creates state over in-memory stores with the given renderer and policy.
    pub fn with_renderer(
        config: ConfigLoader,
        employees: impl IntoIterator<Item = Employee>,
        renderer: Arc<dyn PayStubRenderer>,
        policy: RegenerationPolicy,
    ) -> Self {
        let employees = Arc::new(InMemoryEmployeeDirectory::with_employees(employees));
        let rates = Arc::new(InMemoryRateCatalog::from_snapshot(config.rate_catalog()));
        let time_entries = Arc::new(InMemoryTimeEntryStore::new());
        let compensation_store = Arc::new(InMemoryCompensationStore::new());

        let clock = AttendanceClock::new(employees.clone(), time_entries.clone());
        let payroll = PayrollEngine::new(
            employees.clone(),
            time_entries,
            compensation_store.clone(),
            rates.clone(),
            Arc::new(InMemoryPayStubStore::new()),
            renderer,
        )
        .with_policy(policy);
        let compensation = CompensationService::new(employees, compensation_store);

        Self {
            attendance: Arc::new(config.attendance().clone()),
            rates,
            clock,
            payroll,
            compensation,
        }
    }

    /// Returns the attendance rules.
    pub fn attendance_config(&self) -> &AttendanceConfig {
        &self.attendance
    }

    /// Returns the rate catalog maintained through the `/rates` endpoints.
    pub fn rates(&self) -> &InMemoryRateCatalog {
        &self.rates
    }

    /// Returns the attendance clock.
    pub fn clock(&self) -> &AttendanceClock {
        &self.clock
    }

    /// Returns the payroll engine.
    pub fn payroll(&self) -> &PayrollEngine {
        &self.payroll
    }

    /// Returns the compensation service.
    pub fn compensation(&self) -> &CompensationService {
        &self.compensation
    }
}
