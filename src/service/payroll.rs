//! The payroll engine.
//!
//! Generating a pay stub for an (employee, month) runs in a fixed order:
//!
//! 1. load the employee, the month's time entries and bonuses, and a rate
//!    catalog snapshot
//! 2. aggregate the month's overtime hours
//! 3. compute the earnings and deductions ledgers and the totals
//! 4. persist the stub according to the [`RegenerationPolicy`]
//! 5. hand the persisted stub to the renderer
//!
//! Step 5 never undoes step 4. Its outcome is returned alongside the stub.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{PayStubInput, aggregate_monthly_overtime, compute_pay_stub};
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeId, PayStub, PayStubKey, YearMonth};
use crate::store::{
    CompensationStore, EmployeeDirectory, PayStubStore, RateCatalogSource, TimeEntryStore,
};

use super::render::PayStubRenderer;

/// What happens when a stub already exists for the (employee, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenerationPolicy {
    /// Replace the existing stub with the new computation.
    #[default]
    Replace,
    /// Refuse with `Conflict`.
    Reject,
    /// Store every computation as its own row.
    Append,
}

/// Outcome of handing a persisted stub to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderingStatus {
    /// The artifact was produced.
    Rendered {
        /// Where the artifact was written.
        artifact_path: PathBuf,
    },
    /// Rendering failed; the stub is persisted but has no artifact.
    Failed {
        /// The renderer's error.
        message: String,
    },
}

/// A persisted pay stub and the result of rendering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPayStub {
    /// The stub as persisted.
    pub pay_stub: PayStub,
    /// Whether the document was produced.
    pub rendering: RenderingStatus,
}

impl GeneratedPayStub {
    /// Whether the stub was computed but not rendered.
    pub fn is_rendered(&self) -> bool {
        matches!(self.rendering, RenderingStatus::Rendered { .. })
    }
}

/// Computes, persists and renders monthly pay stubs.
#[derive(Clone)]
pub struct PayrollEngine {
    employees: Arc<dyn EmployeeDirectory>,
    time_entries: Arc<dyn TimeEntryStore>,
    compensation: Arc<dyn CompensationStore>,
    rates: Arc<dyn RateCatalogSource>,
    pay_stubs: Arc<dyn PayStubStore>,
    renderer: Arc<dyn PayStubRenderer>,
    policy: RegenerationPolicy,
}

impl PayrollEngine {
    /// Creates an engine using [`RegenerationPolicy::Replace`].
    pub fn new(
        employees: Arc<dyn EmployeeDirectory>,
        time_entries: Arc<dyn TimeEntryStore>,
        compensation: Arc<dyn CompensationStore>,
        rates: Arc<dyn RateCatalogSource>,
        pay_stubs: Arc<dyn PayStubStore>,
        renderer: Arc<dyn PayStubRenderer>,
    ) -> Self {
        Self {
            employees,
            time_entries,
            compensation,
            rates,
            pay_stubs,
            renderer,
            policy: RegenerationPolicy::default(),
        }
    }

    /// Sets the regeneration policy.
    pub fn with_policy(mut self, policy: RegenerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The regeneration policy in effect.
    pub fn policy(&self) -> RegenerationPolicy {
        self.policy
    }

    /// Computes and persists the pay stub of `employee_id` for `month`, then renders it.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the employee does not exist
    /// - `Validation` when the employee's base salary is not positive
    /// - `Conflict` under [`RegenerationPolicy::Reject`] when a stub exists
    ///
    /// A rendering failure is not an error: it is reported as
    /// [`RenderingStatus::Failed`] on a stub that stays persisted.
    pub fn generate_pay_stub(
        &self,
        employee_id: EmployeeId,
        month: YearMonth,
    ) -> EngineResult<GeneratedPayStub> {
        let start_time = Instant::now();

        let employee = self
            .employees
            .find_employee(employee_id)?
            .ok_or_else(|| EngineError::not_found("employee", employee_id))?;

        let entries = self.time_entries.entries_in_range(
            Some(employee_id),
            month.first_day(),
            month.last_day(),
        )?;
        let overtime_hours = aggregate_monthly_overtime(&entries, employee_id, month);

        let bonus_total: Decimal = self
            .compensation
            .bonuses_for(employee_id, month)?
            .iter()
            .map(|b| b.amount)
            .sum();

        let catalog = self.rates.snapshot()?;

        let stub = compute_pay_stub(&PayStubInput {
            employee: &employee,
            month,
            overtime_hours,
            bonus_total,
            catalog: &catalog,
        })?;

        let stub = match self.policy {
            RegenerationPolicy::Replace => self.pay_stubs.replace(stub)?,
            RegenerationPolicy::Reject => self.pay_stubs.insert_new(stub)?,
            RegenerationPolicy::Append => self.pay_stubs.save(stub)?,
        };

        info!(
            employee_id,
            month = %month,
            pay_stub_id = %stub.id,
            overtime_hours = %overtime_hours,
            gross_salary = %stub.gross_salary,
            net_salary = %stub.net_salary,
            duration_us = start_time.elapsed().as_micros(),
            "Pay stub generated"
        );

        let rendering = match self.renderer.render(&stub) {
            Ok(artifact_path) => RenderingStatus::Rendered { artifact_path },
            Err(err) => {
                warn!(
                    employee_id,
                    month = %month,
                    pay_stub_id = %stub.id,
                    error = %err,
                    "Pay stub persisted but not rendered"
                );
                RenderingStatus::Failed {
                    message: err.to_string(),
                }
            }
        };

        Ok(GeneratedPayStub {
            pay_stub: stub,
            rendering,
        })
    }

    /// Looks up the stored pay stub of `employee_id` for `month`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no stub has been generated.
    pub fn get_pay_stub(&self, employee_id: EmployeeId, month: YearMonth) -> EngineResult<PayStub> {
        self.pay_stubs
            .find(PayStubKey { employee_id, month })?
            .ok_or_else(|| {
                EngineError::not_found("pay stub", format!("employee {} in {}", employee_id, month))
            })
    }
}
