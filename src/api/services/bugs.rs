//! Bug list and detail views

use actix_web::{HttpRequest, HttpResponse, Responder, http::StatusCode, web};
use std::sync::Arc;
use tera::Context;
use tracing::{error, trace};

use super::views::BugView;
use crate::api::middleware::{AuthenticatedUser, LoginRequired};
use crate::api::templates::{render, render_with_status};
use crate::config::get_config;
use crate::services::BugService;

pub struct BugViews;

impl BugViews {
    /// `GET /`: latest bugs, newest first
    pub async fn index(
        service: web::Data<Arc<BugService>>,
        user: web::ReqData<AuthenticatedUser>,
    ) -> impl Responder {
        let limit = get_config().bugs.latest_count;
        trace!("Rendering bug index for {}", user.username);

        match service.latest(limit).await {
            Ok(bugs) => {
                let views: Vec<BugView> = bugs.iter().map(BugView::from).collect();
                let mut context = Context::new();
                context.insert("bugs", &views);
                context.insert("user", &user.username);
                context.insert("is_staff", &user.is_staff);
                render("bugs/index.html", &context)
            }
            Err(e) => {
                error!("Failed to load latest bugs: {}", e);
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }

    /// `GET /{id}/`: one bug, 404 when missing
    pub async fn detail(
        req: HttpRequest,
        service: web::Data<Arc<BugService>>,
        user: web::ReqData<AuthenticatedUser>,
        path: web::Path<String>,
    ) -> impl Responder {
        let Ok(id) = path.into_inner().parse::<i32>() else {
            return bug_not_found(req).await;
        };

        match service.detail(id).await {
            Ok(bug) => {
                let mut context = Context::new();
                context.insert("bug", &BugView::from(&bug));
                context.insert("user", &user.username);
                context.insert("is_staff", &user.is_staff);
                render("bugs/detail.html", &context)
            }
            Err(e) if e.is_not_found() => bug_not_found(req).await,
            Err(e) => {
                error!("Failed to load bug {}: {}", id, e);
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

/// Bug tracker 404 page
pub async fn bug_not_found(req: HttpRequest) -> HttpResponse {
    trace!("No bug tracker route for {}", req.path());
    let mut context = Context::new();
    context.insert("request_path", req.path());
    render_with_status(StatusCode::NOT_FOUND, "bugs/404.html", &context)
}

/// Bug tracker routes; both views require login
pub fn bug_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .name("index")
            .wrap(LoginRequired)
            .route(web::get().to(BugViews::index))
            .route(web::head().to(BugViews::index)),
    )
    .service(
        web::resource("/{id}/")
            .name("detail")
            .wrap(LoginRequired)
            .route(web::get().to(BugViews::detail))
            .route(web::head().to(BugViews::detail)),
    );
}
