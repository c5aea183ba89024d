//! Repositories backing the host capability traits.

pub mod cron_event;
pub mod option;
pub mod transient;

pub use cron_event::{CronEvent, CronEventRepository};
pub use option::OptionRepository;
pub use transient::TransientRepository;
