//! External command execution and deadline management.

pub mod command;
pub mod deadline;

pub use command::{execute, execute_checked, CommandResult};
pub use deadline::{Deadline, DEFAULT_TIMEOUT};
