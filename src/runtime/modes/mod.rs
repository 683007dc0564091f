//! Mode routing
//!
//! - Bug tracker server (`bugs serve`)
//! - Demo app server (`demo serve`)
//! - CLI mode (every other subcommand)

#[cfg(feature = "server")]
pub mod bugs_server;

#[cfg(feature = "server")]
pub mod demo_server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use bugs_server::run_bugs_server;

#[cfg(feature = "server")]
pub use demo_server::run_demo_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;
