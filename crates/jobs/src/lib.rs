//! Propcast Background Jobs
//!
//! Generic interval scheduler plus the periodic tasks the application
//! registers on it (cache sweep, conditions pre-warm).
pub mod scheduler;
pub mod tasks;

pub use scheduler::{SchedulerStatus, TaskFn, TaskScheduler, TaskStatus};
pub use tasks::{cache_sweep_task, conditions_refresh_task};
