//! Services orchestrating calculations over the stores.
//!
//! - [`AttendanceClock`] runs the check-in/check-out state machine
//! - [`PayrollEngine`] generates and looks up monthly pay stubs
//! - [`CompensationService`] validates bonuses and salary advances

mod attendance;
mod compensation;
mod payroll;
mod render;
mod report;

pub use attendance::AttendanceClock;
pub use compensation::CompensationService;
pub use payroll::{GeneratedPayStub, PayrollEngine, RegenerationPolicy, RenderingStatus};
pub use render::{JsonSnapshotRenderer, NoopRenderer, PayStubRenderer};
pub use report::AttendanceReport;
