//! Configuration loading, resolution, and validation.

pub mod loader;
pub mod schema;

pub use loader::{find_config, load, load_file, resolve, Overrides};
pub use schema::{CommandOverrides, CommandSpec, IssueConfig, RelayConfig, RunConfig};
