//! Bug tracker server mode

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::services::{account_routes, admin_routes, bug_not_found, bug_routes};
use crate::runtime::lifetime;

/// Run the bug tracker HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_bugs_server() -> Result<()> {
    let startup = lifetime::startup::prepare_bugs_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let bug_service = startup.bug_service.clone();
    let account_service = startup.account_service.clone();

    let config = crate::config::get_config();
    let workers = config.bugs.workers.clamp(1, 32);
    warn!("Using {} workers for the bug tracker", workers);

    // Clone db reference before storage moves into HttpServer closure
    let db_for_shutdown = startup.storage.get_db().clone();

    let bind_address = format!("{}:{}", config.bugs.host, config.bugs.port);
    warn!("Starting bug tracker at http://{}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(bug_service.clone()))
            .app_data(web::Data::new(account_service.clone()))
            .app_data(web::FormConfig::default().limit(64 * 1024))
            .configure(account_routes)
            .configure(admin_routes)
            .configure(bug_routes)
            .default_service(web::to(bug_not_found))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(workers)
    .bind(bind_address)?
    .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
