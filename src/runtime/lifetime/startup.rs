use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::services::{AccountService, BugService};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub bug_service: Arc<BugService>,
    pub account_service: Arc<AccountService>,
}

/// 准备 bug tracker 启动的上下文
///
/// Opens storage (running migrations), builds the services and the
/// session token service.
pub async fn prepare_bugs_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    // Fail before binding if the template set is broken
    crate::api::templates::engine().context("Failed to load templates")?;

    // Creates the signing key now so a missing secret is reported at startup
    crate::api::jwt::get_jwt_service();

    let bug_service = Arc::new(BugService::new(storage.clone()));
    let account_service = Arc::new(AccountService::new(storage.clone()));

    let bug_count = bug_service
        .count()
        .await
        .context("Failed to query bug count")?;
    info!("{} bugs in the tracker", bug_count);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        bug_service,
        account_service,
    })
}
