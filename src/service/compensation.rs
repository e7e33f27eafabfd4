//! Bonuses and salary advances.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{AdvanceStatus, Bonus, EmployeeId, SalaryAdvance, YearMonth};
use crate::store::{CompensationStore, EmployeeDirectory};

/// Validates and records bonuses and salary advances.
#[derive(Clone)]
pub struct CompensationService {
    employees: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn CompensationStore>,
}

fn validate_new(
    id: Option<u64>,
    amount: Decimal,
    month: Option<YearMonth>,
) -> EngineResult<YearMonth> {
    if id.is_some() {
        return Err(EngineError::validation(
            "id",
            "a new record must not carry an id",
        ));
    }
    if amount <= Decimal::ZERO {
        return Err(EngineError::validation(
            "amount",
            format!("amount must be positive, got {}", amount),
        ));
    }
    month.ok_or_else(|| EngineError::validation("month", "a reference month is required"))
}

impl CompensationService {
    /// Creates a service over the given stores.
    pub fn new(employees: Arc<dyn EmployeeDirectory>, store: Arc<dyn CompensationStore>) -> Self {
        Self { employees, store }
    }

    fn require_employee(&self, employee_id: EmployeeId) -> EngineResult<()> {
        match self.employees.find_employee(employee_id)? {
            Some(_) => Ok(()),
            None => Err(EngineError::not_found("employee", employee_id)),
        }
    }

    /// Records a bonus.
    ///
    /// # Errors
    ///
    /// - `Validation` when the bonus carries an id, has a non-positive amount
    ///   or no month
    /// - `NotFound` when the employee does not exist
    pub fn create_bonus(&self, bonus: Bonus) -> EngineResult<Bonus> {
        let month = validate_new(bonus.id, bonus.amount, bonus.month)?;
        self.require_employee(bonus.employee_id)?;

        let bonus = self.store.save_bonus(bonus)?;
        info!(
            employee_id = bonus.employee_id,
            month = %month,
            amount = %bonus.amount,
            "Bonus recorded"
        );
        Ok(bonus)
    }

    /// All recorded bonuses.
    pub fn list_bonuses(&self) -> EngineResult<Vec<Bonus>> {
        self.store.all_bonuses()
    }

    /// Bonuses of one employee for one month.
    pub fn bonuses_for(&self, employee_id: EmployeeId, month: YearMonth) -> EngineResult<Vec<Bonus>> {
        self.store.bonuses_for(employee_id, month)
    }

    /// Records a salary advance request as `Pending`.
    ///
    /// # Errors
    ///
    /// Same as [`CompensationService::create_bonus`].
    pub fn create_salary_advance(&self, advance: SalaryAdvance) -> EngineResult<SalaryAdvance> {
        let month = validate_new(advance.id, advance.amount, advance.month)?;
        self.require_employee(advance.employee_id)?;

        let advance = self.store.save_salary_advance(SalaryAdvance {
            status: AdvanceStatus::Pending,
            ..advance
        })?;
        info!(
            employee_id = advance.employee_id,
            month = %month,
            amount = %advance.amount,
            "Salary advance requested"
        );
        Ok(advance)
    }

    /// All salary advances.
    pub fn list_salary_advances(&self) -> EngineResult<Vec<SalaryAdvance>> {
        self.store.all_salary_advances()
    }

    /// Approves a pending advance.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the advance does not exist
    /// - `InvalidState` when it is no longer pending
    pub fn approve_salary_advance(&self, id: u64) -> EngineResult<SalaryAdvance> {
        self.decide(id, AdvanceStatus::Approved)
    }

    /// Rejects a pending advance.
    ///
    /// # Errors
    ///
    /// Same as [`CompensationService::approve_salary_advance`].
    pub fn reject_salary_advance(&self, id: u64) -> EngineResult<SalaryAdvance> {
        self.decide(id, AdvanceStatus::Rejected)
    }

    fn decide(&self, id: u64, target: AdvanceStatus) -> EngineResult<SalaryAdvance> {
        let advance = self
            .store
            .transition_salary_advance(id, target)
            .inspect_err(|err| {
                warn!(advance_id = id, error = %err, "Salary advance decision rejected");
            })?;

        info!(advance_id = id, status = %advance.status, "Salary advance decided");
        Ok(advance)
    }
}
