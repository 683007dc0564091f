//! `vars` and `whois`

use crate::client::{fetch_debug_vars, fetch_vars_summary, fetch_whois, render_vars_table};
use crate::interfaces::cli::CliError;

pub async fn run_vars(url: &str) -> Result<(), CliError> {
    let vars = fetch_debug_vars(url).await?;
    println!("JSON: {}", vars.json);
    println!("Raw: {}", vars.raw);
    Ok(())
}

pub async fn run_vars_summary(url_template: &str, services: &[String]) -> Result<(), CliError> {
    let rows = fetch_vars_summary(url_template, services).await?;
    print!("{}", render_vars_table(&rows));
    Ok(())
}

pub async fn run_whois(url: &str) -> Result<(), CliError> {
    let whois = fetch_whois(url).await?;
    println!("{}", whois);
    Ok(())
}
