//! HTTP glue clients and the CLI service context
//!
//! The glue commands talk to Go services over plain HTTPS with a shared
//! ureq [`Agent`]. ureq is blocking, so every request runs inside
//! `tokio::task::spawn_blocking`.

mod context;
pub mod vars;
pub mod whois;

pub use context::ServiceContext;
pub use vars::{DebugVars, RawVars, VarsRow, fetch_debug_vars, fetch_vars_summary, render_vars_table};
pub use whois::{Whois, fetch_whois};

use std::sync::OnceLock;
use std::time::Duration;

use tracing::{debug, trace};
use ureq::Agent;

use crate::errors::{AstrolabError, Result};

/// 全局 HTTP Agent（ureq 的 Agent 是 Send + Sync）
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        let timeout = crate::config::get_config().glue.http_timeout_secs;
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout)))
            .build()
            .into()
    })
}

/// GET `url` and return the body as text. Non-2xx statuses are errors.
fn fetch_text_sync(url: &str) -> Result<String> {
    debug!("GET {}", url);
    let resp = get_agent().get(url).call()?;
    trace!("{} answered {}", url, resp.status());

    resp.into_body()
        .read_to_string()
        .map_err(|e| AstrolabError::http(format!("reading body from {} failed: {}", url, e)))
}

/// 异步包装：在线程池中执行同步 HTTP 请求
pub async fn fetch_text(url: &str) -> Result<String> {
    let url = url.to_string();
    tokio::task::spawn_blocking(move || fetch_text_sync(&url))
        .await
        .map_err(|e| AstrolabError::http(format!("request task failed: {}", e)))?
}
