//! `native`

use crate::interfaces::cli::CliError;
use crate::native::run_bridge;

pub fn run_native(library: &str, video_id: &str) -> Result<(), CliError> {
    let report = run_bridge(library, video_id)?;
    println!("{}", report);
    Ok(())
}
