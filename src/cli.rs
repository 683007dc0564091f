//! Command-line interface definitions using clap
//!
//! Every program in astrolab is a subcommand of the one binary.

use clap::{Parser, Subcommand};

/// astrolab - a bug tracker, a demo web app and a few HTTP helpers
#[derive(Parser)]
#[command(name = "astrolab")]
#[command(version)]
#[command(about = "Small web apps and HTTP helpers", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bug tracker
    Bugs {
        #[command(subcommand)]
        action: BugsCommands,
    },

    /// Demo web app
    Demo {
        #[command(subcommand)]
        action: DemoCommands,
    },

    /// Call Add, Version and WatchTime from a shared library
    Native {
        /// Shared library path (default: native.library_path)
        #[arg(long)]
        lib: Option<String>,

        /// Video id passed to WatchTime (default: native.video_id)
        #[arg(long)]
        video: Option<String>,
    },

    /// Fetch a /debug/vars document
    Vars {
        /// URL to fetch (default: glue.vars_url)
        #[arg(long, conflicts_with = "summary")]
        url: Option<String>,

        /// Print a table for several services instead of one raw document
        #[arg(long)]
        summary: bool,

        /// Service names for --summary (default: glue.vars_services)
        #[arg(long = "service", requires = "summary")]
        services: Vec<String>,
    },

    /// Greet the caller using the tailnet whois endpoint
    Whois {
        /// URL to fetch (default: glue.whois_url)
        #[arg(long)]
        url: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum BugsCommands {
    /// Start the bug tracker HTTP server
    Serve,

    /// Create a login account
    UserAdd {
        username: String,

        /// Password (read one line from stdin when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Allow access to the admin bug list
        #[arg(long)]
        staff: bool,
    },

    /// Insert a bug
    Add {
        /// Username of the owner
        owner: String,

        title: String,

        #[arg(long, default_value = "")]
        text: String,

        /// open or closed
        #[arg(long)]
        state: Option<String>,
    },

    /// Print the most recent bugs
    List {
        #[arg(long, default_value_t = 5)]
        limit: u64,
    },
}

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Start the demo HTTP server
    Serve,
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Commands that run an HTTP server until shutdown
    pub fn is_server(&self) -> bool {
        matches!(
            self,
            Commands::Bugs {
                action: BugsCommands::Serve
            } | Commands::Demo {
                action: DemoCommands::Serve
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bugs_list_defaults_to_five() {
        let cli = Cli::try_parse_from(["astrolab", "bugs", "list"]).unwrap();
        match cli.command {
            Commands::Bugs {
                action: BugsCommands::List { limit },
            } => assert_eq!(limit, 5),
            _ => panic!("expected bugs list"),
        }
    }

    #[test]
    fn vars_summary_collects_services() {
        let cli = Cli::try_parse_from([
            "astrolab", "vars", "--summary", "--service", "bot", "--service", "go",
        ])
        .unwrap();
        match cli.command {
            Commands::Vars {
                summary, services, ..
            } => {
                assert!(summary);
                assert_eq!(services, vec!["bot", "go"]);
            }
            _ => panic!("expected vars"),
        }
    }

    #[test]
    fn service_without_summary_is_rejected() {
        assert!(Cli::try_parse_from(["astrolab", "vars", "--service", "bot"]).is_err());
    }

    #[test]
    fn serve_commands_are_servers() {
        let cli = Cli::try_parse_from(["astrolab", "demo", "serve"]).unwrap();
        assert!(cli.command.is_server());
        let cli = Cli::try_parse_from(["astrolab", "whois"]).unwrap();
        assert!(!cli.command.is_server());
    }
}
