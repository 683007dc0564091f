//! Admin bug list (title, state, owner, timestamps)

use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use std::sync::Arc;
use tera::Context;
use tracing::{error, info};

use super::views::BugView;
use crate::api::middleware::{AuthenticatedUser, LoginRequired};
use crate::api::templates::{render, render_with_status};
use crate::services::BugService;

/// Columns shown by the admin list
pub const LIST_DISPLAY: [&str; 5] = ["title", "state", "owner", "created_at", "updated_at"];

pub struct AdminViews;

impl AdminViews {
    /// `GET /admin/bugs/`: staff only
    pub async fn bug_list(
        service: web::Data<Arc<BugService>>,
        user: web::ReqData<AuthenticatedUser>,
    ) -> impl Responder {
        if !user.is_staff {
            info!("Non-staff user {} denied admin access", user.username);
            return render_with_status(StatusCode::FORBIDDEN, "admin/403.html", &Context::new());
        }

        match service.all().await {
            Ok(bugs) => {
                let views: Vec<BugView> = bugs.iter().map(BugView::from).collect();
                let mut context = Context::new();
                context.insert("bugs", &views);
                context.insert("columns", &LIST_DISPLAY);
                context.insert("user", &user.username);
                render("admin/bug_list.html", &context)
            }
            Err(e) => {
                error!("Failed to load bugs for admin list: {}", e);
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/admin/bugs/")
            .name("admin_bug_list")
            .wrap(LoginRequired)
            .route(web::get().to(AdminViews::bug_list))
            .route(web::head().to(AdminViews::bug_list)),
    );
}
