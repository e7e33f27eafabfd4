//! In-memory store implementations.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, RwLock};

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdvanceStatus, Bonus, Employee, EmployeeId, PayStub, PayStubKey, SalaryAdvance, TimeEntry,
    TimeEntryId, YearMonth,
};

use super::{CompensationStore, EmployeeDirectory, PayStubStore, TimeEntryStore, lock, read};

/// Employee records held in memory.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<HashMap<EmployeeId, Employee>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates a directory holding `employees`.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        Self {
            employees: RwLock::new(employees.into_iter().map(|e| (e.id, e)).collect()),
        }
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn find_employee(&self, id: EmployeeId) -> EngineResult<Option<Employee>> {
        Ok(read(&self.employees)?.get(&id).cloned())
    }
}

#[derive(Debug, Default)]
struct TimeEntryArena {
    next_id: TimeEntryId,
    entries: BTreeMap<TimeEntryId, TimeEntry>,
    open_by_employee: HashMap<EmployeeId, TimeEntryId>,
}

/// Time entries held in a single-writer arena.
///
/// The open-session index is keyed by employee and updated under the same
/// lock as the entries, so the check for an existing open session and the
/// insert of a new one cannot interleave with another check-in.
#[derive(Debug, Default)]
pub struct InMemoryTimeEntryStore {
    arena: Mutex<TimeEntryArena>,
}

impl InMemoryTimeEntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn select(
        &self,
        employee_id: Option<EmployeeId>,
        keep: impl Fn(&TimeEntry) -> bool,
    ) -> EngineResult<Vec<TimeEntry>> {
        let arena = lock(&self.arena)?;
        let mut entries: Vec<TimeEntry> = arena
            .entries
            .values()
            .filter(|e| employee_id.is_none_or(|id| e.employee_id == id))
            .filter(|e| keep(e))
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.date, e.check_in, e.id));
        Ok(entries)
    }
}

impl TimeEntryStore for InMemoryTimeEntryStore {
    fn open_session(&self, mut entry: TimeEntry) -> EngineResult<TimeEntry> {
        let mut arena = lock(&self.arena)?;

        if let Some(open_id) = arena.open_by_employee.get(&entry.employee_id) {
            return Err(EngineError::Conflict {
                message: format!(
                    "employee {} already has an open session (entry {})",
                    entry.employee_id, open_id
                ),
            });
        }

        arena.next_id += 1;
        entry.id = arena.next_id;
        arena.open_by_employee.insert(entry.employee_id, entry.id);
        arena.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn find_open_session(&self, employee_id: EmployeeId) -> EngineResult<Option<TimeEntry>> {
        let arena = lock(&self.arena)?;
        Ok(arena
            .open_by_employee
            .get(&employee_id)
            .and_then(|id| arena.entries.get(id))
            .cloned())
    }

    fn complete_session(&self, entry: TimeEntry) -> EngineResult<TimeEntry> {
        let mut arena = lock(&self.arena)?;

        if !arena.entries.contains_key(&entry.id) {
            return Err(EngineError::not_found("time entry", entry.id));
        }
        if arena.open_by_employee.get(&entry.employee_id) != Some(&entry.id) {
            return Err(EngineError::Conflict {
                message: format!("time entry {} is no longer open", entry.id),
            });
        }

        arena.open_by_employee.remove(&entry.employee_id);
        arena.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn entries_for_day(
        &self,
        employee_id: Option<EmployeeId>,
        date: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>> {
        self.select(employee_id, |e| e.date == date)
    }

    fn entries_in_range(
        &self,
        employee_id: Option<EmployeeId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>> {
        self.select(employee_id, |e| e.date >= start && e.date <= end)
    }
}

#[derive(Debug, Default)]
struct CompensationRecords {
    next_bonus_id: u64,
    bonuses: BTreeMap<u64, Bonus>,
    next_advance_id: u64,
    advances: BTreeMap<u64, SalaryAdvance>,
}

/// Bonuses and salary advances held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCompensationStore {
    records: Mutex<CompensationRecords>,
}

impl InMemoryCompensationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompensationStore for InMemoryCompensationStore {
    fn save_bonus(&self, mut bonus: Bonus) -> EngineResult<Bonus> {
        let mut records = lock(&self.records)?;
        records.next_bonus_id += 1;
        let id = records.next_bonus_id;
        bonus.id = Some(id);
        records.bonuses.insert(id, bonus.clone());
        Ok(bonus)
    }

    fn bonuses_for(&self, employee_id: EmployeeId, month: YearMonth) -> EngineResult<Vec<Bonus>> {
        let records = lock(&self.records)?;
        Ok(records
            .bonuses
            .values()
            .filter(|b| b.employee_id == employee_id && b.month == Some(month))
            .cloned()
            .collect())
    }

    fn all_bonuses(&self) -> EngineResult<Vec<Bonus>> {
        Ok(lock(&self.records)?.bonuses.values().cloned().collect())
    }

    fn save_salary_advance(&self, mut advance: SalaryAdvance) -> EngineResult<SalaryAdvance> {
        let mut records = lock(&self.records)?;
        records.next_advance_id += 1;
        let id = records.next_advance_id;
        advance.id = Some(id);
        records.advances.insert(id, advance.clone());
        Ok(advance)
    }

    fn transition_salary_advance(
        &self,
        id: u64,
        target: AdvanceStatus,
    ) -> EngineResult<SalaryAdvance> {
        let mut records = lock(&self.records)?;
        let stored = records
            .advances
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("salary advance", id))?;
        stored.transition(target)?;
        Ok(stored.clone())
    }

    fn all_salary_advances(&self) -> EngineResult<Vec<SalaryAdvance>> {
        Ok(lock(&self.records)?.advances.values().cloned().collect())
    }
}

/// Pay stubs held in memory, oldest first.
#[derive(Debug, Default)]
pub struct InMemoryPayStubStore {
    rows: Mutex<Vec<PayStub>>,
}

impl InMemoryPayStubStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows across all keys.
    pub fn len(&self) -> EngineResult<usize> {
        Ok(lock(&self.rows)?.len())
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> EngineResult<bool> {
        Ok(lock(&self.rows)?.is_empty())
    }
}

impl PayStubStore for InMemoryPayStubStore {
    fn save(&self, stub: PayStub) -> EngineResult<PayStub> {
        lock(&self.rows)?.push(stub.clone());
        Ok(stub)
    }

    fn insert_new(&self, stub: PayStub) -> EngineResult<PayStub> {
        let mut rows = lock(&self.rows)?;
        let key = stub.key();
        if rows.iter().any(|r| r.key() == key) {
            return Err(EngineError::Conflict {
                message: format!(
                    "a pay stub already exists for employee {} in {}",
                    key.employee_id, key.month
                ),
            });
        }
        rows.push(stub.clone());
        Ok(stub)
    }

    fn replace(&self, stub: PayStub) -> EngineResult<PayStub> {
        let mut rows = lock(&self.rows)?;
        let key = stub.key();
        rows.retain(|r| r.key() != key);
        rows.push(stub.clone());
        Ok(stub)
    }

    fn find(&self, key: PayStubKey) -> EngineResult<Option<PayStub>> {
        Ok(lock(&self.rows)?
            .iter()
            .rev()
            .find(|r| r.key() == key)
            .cloned())
    }

    fn find_all(&self, key: PayStubKey) -> EngineResult<Vec<PayStub>> {
        Ok(lock(&self.rows)?
            .iter()
            .filter(|r| r.key() == key)
            .cloned()
            .collect())
    }
}
