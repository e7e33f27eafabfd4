//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compensation;
mod employee;
mod pay_stub;
mod time_entry;
mod year_month;

pub use compensation::{AdvanceStatus, Bonus, SalaryAdvance};
pub use employee::{Employee, EmployeeId};
pub use pay_stub::{PayStub, PayStubKey, SalaryComponent, SalaryDeduction};
pub use time_entry::{EntryType, SessionState, TimeEntry, TimeEntryId};
pub use year_month::YearMonth;
