//! CLI command implementations

mod bug_management;
mod config_gen;
mod glue;
mod native;

pub use bug_management::*;
pub use config_gen::*;
pub use glue::*;
pub use native::*;
