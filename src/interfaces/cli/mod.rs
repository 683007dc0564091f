//! CLI interface module
//!
//! Runs the non-server subcommands. Server subcommands are started by the
//! runtime modes instead.

pub mod commands;

use std::fmt;

use crate::cli::{BugsCommands, Commands, ConfigCommands};
use crate::client::ServiceContext;
use crate::errors::AstrolabError;
use commands::{add_bug, add_user, config_generate, list_bugs, run_native, run_vars, run_whois};

#[derive(Debug)]
pub enum CliError {
    Failed(AstrolabError),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::Failed(err) => format!("Error: {}: {}", err.error_type(), err.message()),
            CliError::CommandError(msg) => format!("Error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        self.format_simple().red().to_string()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<AstrolabError> for CliError {
    fn from(err: AstrolabError) -> Self {
        CliError::Failed(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Failed(err.into())
    }
}

fn server_command() -> CliError {
    CliError::CommandError("server commands are started by the runtime, not the CLI".to_string())
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, ctx: &ServiceContext) -> Result<(), CliError> {
    let config = crate::config::get_config();

    match cmd {
        Commands::Bugs { action } => match action {
            BugsCommands::UserAdd {
                username,
                password,
                staff,
            } => add_user(ctx, username, password, staff).await,
            BugsCommands::Add {
                owner,
                title,
                text,
                state,
            } => add_bug(ctx, owner, title, text, state).await,
            BugsCommands::List { limit } => list_bugs(ctx, limit).await,
            BugsCommands::Serve => Err(server_command()),
        },

        Commands::Demo { .. } => Err(server_command()),

        Commands::Native { lib, video } => {
            let lib = lib.unwrap_or_else(|| config.native.library_path.clone());
            let video = video.unwrap_or_else(|| config.native.video_id.clone());
            run_native(&lib, &video)
        }

        Commands::Vars {
            url,
            summary,
            services,
        } => {
            if summary {
                let services = if services.is_empty() {
                    config.glue.vars_services.clone()
                } else {
                    services
                };
                commands::run_vars_summary(&config.glue.vars_service_url, &services).await
            } else {
                let url = url.unwrap_or_else(|| config.glue.vars_url.clone());
                run_vars(&url).await
            }
        }

        Commands::Whois { url } => {
            let url = url.unwrap_or_else(|| config.glue.whois_url.clone());
            run_whois(&url).await
        }

        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => {
                config_generate(output_path, force).await
            }
        },
    }
}
