//! CLI mode
//!
//! Runs one subcommand with a lazily opened service context.

use crate::cli::Commands;
use crate::client::ServiceContext;
use crate::interfaces::cli::{CliError, run_cli_command};

pub async fn run_cli(cmd: Commands) -> Result<(), CliError> {
    let ctx = ServiceContext::new();
    run_cli_command(cmd, &ctx).await
}
