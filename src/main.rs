use clap::Parser;

use astrolab::cli::{BugsCommands, Cli, Commands, DemoCommands};
use astrolab::config::{get_config, init_config_from};
use astrolab::runtime::modes;
use astrolab::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_config_from(&cli.config);
    let config = get_config();

    let is_server = cli.command.is_server();
    // Keep the guard alive so buffered log lines are flushed on exit
    let guard = init_logging(&config.logging, !is_server)?;

    match cli.command {
        Commands::Bugs {
            action: BugsCommands::Serve,
        } => modes::run_bugs_server().await,
        Commands::Demo {
            action: DemoCommands::Serve,
        } => modes::run_demo_server().await,
        cmd => {
            if let Err(e) = modes::run_cli(cmd).await {
                eprintln!("{}", e.format_colored());
                drop(guard);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
