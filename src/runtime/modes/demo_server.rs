//! Demo app server mode

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use tracing::warn;

use crate::api::services::{DemoService, demo_routes};

/// Run the demo HTTP server until Ctrl+C
pub async fn run_demo_server() -> Result<()> {
    let config = crate::config::get_config();

    crate::api::templates::engine()?;

    let bind_address = format!("{}:{}", config.demo.host, config.demo.port);
    warn!("Starting demo app at http://{}", bind_address);

    HttpServer::new(|| {
        App::new()
            .wrap(Compress::default())
            .configure(demo_routes)
            .default_service(web::to(DemoService::not_found))
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
