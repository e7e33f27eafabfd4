//! Storage collaborators of the payroll engine.
//!
//! The engine never talks to a storage engine directly. Every record it reads
//! or writes goes through one of the traits below; [`memory`] provides the
//! in-memory implementations used by the HTTP server and the tests.
//!
//! Stores are synchronous: each engine call is one unit of work that only
//! suspends on store access.

mod memory;
mod rate_catalog;

use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::config::RateCatalog;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdvanceStatus, Bonus, Employee, EmployeeId, PayStub, PayStubKey, SalaryAdvance, TimeEntry,
    YearMonth,
};

pub use memory::{
    InMemoryCompensationStore, InMemoryEmployeeDirectory, InMemoryPayStubStore,
    InMemoryTimeEntryStore,
};
pub use rate_catalog::InMemoryRateCatalog;

/// Read access to employee records.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee by id.
    fn find_employee(&self, id: EmployeeId) -> EngineResult<Option<Employee>>;
}

/// Persistence of attendance time entries.
///
/// Implementations must make [`TimeEntryStore::open_session`] an atomic
/// check-and-insert per employee: two concurrent check-ins for the same
/// employee can never both succeed.
pub trait TimeEntryStore: Send + Sync {
    /// Inserts `entry` as the employee's open session and assigns its id.
    ///
    /// Fails with `Conflict` when the employee already has an open session.
    fn open_session(&self, entry: TimeEntry) -> EngineResult<TimeEntry>;

    /// Returns the employee's open session, if any.
    fn find_open_session(&self, employee_id: EmployeeId) -> EngineResult<Option<TimeEntry>>;

    /// Stores a closed entry in place of its open session.
    ///
    /// Fails with `Conflict` when the session was closed in the meantime and
    /// with `NotFound` when the entry does not exist.
    fn complete_session(&self, entry: TimeEntry) -> EngineResult<TimeEntry>;

    /// Entries dated `date`, for one employee or everyone.
    fn entries_for_day(
        &self,
        employee_id: Option<EmployeeId>,
        date: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>>;

    /// Entries dated within `start..=end`, ordered by date then check-in.
    fn entries_in_range(
        &self,
        employee_id: Option<EmployeeId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>>;
}

/// Persistence of bonuses and salary advances.
pub trait CompensationStore: Send + Sync {
    /// Inserts a bonus and assigns its id.
    fn save_bonus(&self, bonus: Bonus) -> EngineResult<Bonus>;
    /// Bonuses of one employee for one month.
    fn bonuses_for(&self, employee_id: EmployeeId, month: YearMonth) -> EngineResult<Vec<Bonus>>;
    /// All bonuses in insertion order.
    fn all_bonuses(&self) -> EngineResult<Vec<Bonus>>;
    /// Inserts a salary advance and assigns its id.
    fn save_salary_advance(&self, advance: SalaryAdvance) -> EngineResult<SalaryAdvance>;
    /// Moves a stored advance to `target` under the store's lock, so two
    /// concurrent decisions cannot both see it `Pending`.
    ///
    /// `NotFound` if it does not exist, `InvalidState` if it is no longer
    /// pending.
    fn transition_salary_advance(
        &self,
        id: u64,
        target: AdvanceStatus,
    ) -> EngineResult<SalaryAdvance>;
    /// All salary advances in insertion order.
    fn all_salary_advances(&self) -> EngineResult<Vec<SalaryAdvance>>;
}

/// Read access to the statutory rate tables.
pub trait RateCatalogSource: Send + Sync {
    /// A consistent snapshot of every rate table.
    fn snapshot(&self) -> EngineResult<RateCatalog>;
}

/// Persistence of computed pay stubs, keyed by (employee, month).
pub trait PayStubStore: Send + Sync {
    /// Appends a stub without looking at existing rows for its key.
    fn save(&self, stub: PayStub) -> EngineResult<PayStub>;

    /// Inserts a stub only if none exists for its key, else `Conflict`.
    fn insert_new(&self, stub: PayStub) -> EngineResult<PayStub>;

    /// Removes every stub for the key and inserts `stub`, as one step.
    fn replace(&self, stub: PayStub) -> EngineResult<PayStub>;

    /// The most recently stored stub for the key.
    fn find(&self, key: PayStubKey) -> EngineResult<Option<PayStub>>;

    /// Every stub stored for the key, oldest first.
    fn find_all(&self, key: PayStubKey) -> EngineResult<Vec<PayStub>>;
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> EngineResult<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| EngineError::StoreUnavailable {
        message: "store lock poisoned".to_string(),
    })
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> EngineResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| EngineError::StoreUnavailable {
        message: "store lock poisoned".to_string(),
    })
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> EngineResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| EngineError::StoreUnavailable {
        message: "store lock poisoned".to_string(),
    })
}
