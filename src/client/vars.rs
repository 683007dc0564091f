//! `/debug/vars` client
//!
//! Go services expose expvar at `/debug/vars`. The plain command prints the
//! whole document; the summary mode extracts a few fields per service.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::fetch_text;
use crate::errors::{AstrolabError, Result};
use crate::utils::format_size;

/// Parsed and raw forms of one `/debug/vars` response
#[derive(Debug, Clone)]
pub struct RawVars {
    pub json: Value,
    pub raw: String,
}

pub async fn fetch_debug_vars(url: &str) -> Result<RawVars> {
    let raw = fetch_text(url).await?;
    let json = serde_json::from_str(&raw)
        .map_err(|e| AstrolabError::serialization(format!("invalid JSON from {}: {}", url, e)))?;
    Ok(RawVars { json, raw })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemStats {
    #[serde(rename = "Alloc", default)]
    pub alloc: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionInfo {
    #[serde(alias = "Commit", default)]
    pub commit: String,
}

/// Some services publish `version` as a bare string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VersionField {
    Info(VersionInfo),
    Plain(String),
}

impl VersionField {
    pub fn commit(&self) -> &str {
        match self {
            VersionField::Info(info) => &info.commit,
            VersionField::Plain(s) => s,
        }
    }
}

/// The subset of expvar fields shown in the summary table
#[derive(Debug, Clone, Deserialize)]
pub struct DebugVars {
    #[serde(default)]
    pub goroutines: i64,
    pub memstats: MemStats,
    #[serde(default)]
    pub uptime: String,
    #[serde(default)]
    pub version: Option<VersionField>,
}

impl DebugVars {
    pub fn commit(&self) -> &str {
        self.version.as_ref().map(VersionField::commit).unwrap_or("")
    }
}

/// One line of the summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarsRow {
    pub service: String,
    pub memory: String,
    pub goroutines: String,
    pub uptime: String,
    pub version: String,
}

impl VarsRow {
    pub fn from_vars(service: &str, vars: &DebugVars) -> Self {
        Self {
            service: service.to_string(),
            memory: format_size(vars.memstats.alloc),
            goroutines: vars.goroutines.to_string(),
            uptime: vars.uptime.clone(),
            version: vars.commit().to_string(),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [
            &self.service,
            &self.memory,
            &self.goroutines,
            &self.uptime,
            &self.version,
        ]
    }
}

pub fn parse_debug_vars(body: &str) -> Result<DebugVars> {
    serde_json::from_str(body).map_err(AstrolabError::from)
}

/// Fetch every service in order. The first failure aborts the run.
pub async fn fetch_vars_summary(url_template: &str, services: &[String]) -> Result<Vec<VarsRow>> {
    let mut rows = Vec::with_capacity(services.len());
    for service in services {
        let url = url_template.replace("{service}", service);
        let body = fetch_text(&url).await?;
        let vars = parse_debug_vars(&body).map_err(|e| {
            AstrolabError::serialization(format!("{}: {}", service, e.message()))
        })?;
        debug!("{} vars decoded", service);
        rows.push(VarsRow::from_vars(service, &vars));
    }
    Ok(rows)
}

const HEADER: [&str; 5] = ["Service", "Memory", "Goroutines", "Uptime", "Version"];

/// Right-aligned columns separated by one space
pub fn render_vars_table(rows: &[VarsRow]) -> String {
    let mut widths = HEADER.map(|h| h.chars().count());
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let lines = std::iter::once(HEADER).chain(rows.iter().map(VarsRow::cells));
    for cells in lines {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = w))
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
