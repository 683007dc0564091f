//! `bugs add`, `bugs list` and `bugs user-add`

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::client::ServiceContext;
use crate::interfaces::cli::CliError;
use crate::services::CreateBugRequest;
use crate::storage::Bug;

/// `Bug #<id>: <title> [<state>] by <owner> at <created_at>`
pub fn format_bug_line(bug: &Bug) -> String {
    format!(
        "{} [{}] by {} at {}",
        bug,
        bug.state,
        bug.owner,
        bug.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

pub async fn list_bugs(ctx: &ServiceContext, limit: u64) -> Result<(), CliError> {
    let bugs = ctx.get_bug_service().await?.latest(limit).await?;

    if bugs.is_empty() {
        println!("{} No bugs found", "ℹ".bold().blue());
        return Ok(());
    }

    for bug in &bugs {
        println!("{}", format_bug_line(bug));
    }
    Ok(())
}

pub async fn add_bug(
    ctx: &ServiceContext,
    owner: String,
    title: String,
    text: String,
    state: Option<String>,
) -> Result<(), CliError> {
    let bug = ctx
        .get_bug_service()
        .await?
        .create(CreateBugRequest {
            owner,
            title,
            state,
            text,
        })
        .await?;

    println!("{} {}", "✓ Added".bold().green(), format_bug_line(&bug));
    Ok(())
}

/// Missing password: prompt twice on a terminal, otherwise read one piped line
fn read_password(password: Option<String>) -> Result<String, CliError> {
    if let Some(pwd) = password {
        return Ok(pwd);
    }

    if io::stdin().is_terminal() {
        prompt_password_with_confirm()
    } else {
        read_piped_password(&mut io::stdin().lock())
    }
}

fn read_piped_password<R: BufRead>(reader: &mut R) -> Result<String, CliError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn prompt_password_with_confirm() -> Result<String, CliError> {
    print!("Password: ");
    io::stdout().flush()?;
    let password = rpassword::read_password()?;

    print!("Password (again): ");
    io::stdout().flush()?;
    let confirm = rpassword::read_password()?;

    confirm_password(password, &confirm)
}

fn confirm_password(password: String, confirm: &str) -> Result<String, CliError> {
    if password != confirm {
        return Err(CliError::CommandError("Passwords do not match".to_string()));
    }
    Ok(password)
}

pub async fn add_user(
    ctx: &ServiceContext,
    username: String,
    password: Option<String>,
    staff: bool,
) -> Result<(), CliError> {
    let password = read_password(password)?;
    let user = ctx
        .get_account_service()
        .await?
        .create_user(&username, &password, staff)
        .await?;

    let role = if user.is_staff { "staff" } else { "user" };
    println!(
        "{} {} ({}, id {})",
        "✓ Created".bold().green(),
        user.username.cyan(),
        role,
        user.id
    );
    Ok(())
}
