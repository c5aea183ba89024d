//! Shared value types.

pub mod recurrence;

pub use recurrence::Recurrence;
