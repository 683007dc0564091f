//! Demo web app: static pages, a greeting form, the User-Agent echo and uname

use actix_web::{
    HttpRequest, HttpResponse, Responder, http::StatusCode, http::header::USER_AGENT, web,
};
use serde::Deserialize;
use tera::Context;
use tracing::{error, trace};

use crate::api::templates::{render, render_with_status};
use crate::services::sysinfo;

/// Name used when the form has none
pub const DEFAULT_NAME: &str = "world";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GreetForm {
    pub name: Option<String>,
}

impl GreetForm {
    fn name_or_default(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_NAME,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SysinfoQuery {
    pub format: Option<String>,
}

pub struct DemoService;

impl DemoService {
    /// `GET /`
    pub async fn index() -> impl Responder {
        render("demo/index.html", &Context::new())
    }

    /// `POST /greet` with form field `name`
    pub async fn greet(form: Option<web::Form<GreetForm>>) -> impl Responder {
        let form = form.map(web::Form::into_inner).unwrap_or_default();
        Self::render_greeting(form.name_or_default())
    }

    /// `GET /greet?name=...`
    pub async fn greet_query(query: Option<web::Query<GreetForm>>) -> impl Responder {
        let query = query.map(web::Query::into_inner).unwrap_or_default();
        Self::render_greeting(query.name_or_default())
    }

    fn render_greeting(name: &str) -> HttpResponse {
        trace!("Greeting {}", name);
        let mut context = Context::new();
        context.insert("name", name);
        render("demo/greet.html", &context)
    }

    /// `GET /ua`: the request's User-Agent as plain text
    pub async fn user_agent(req: HttpRequest) -> impl Responder {
        let ua = req
            .headers()
            .get(USER_AGENT)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();

        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(ua)
    }

    /// `GET /sysinfo`, JSON with `?format=json`
    pub async fn sysinfo(query: web::Query<SysinfoQuery>) -> impl Responder {
        let info = match sysinfo::uname() {
            Ok(info) => info,
            Err(e) => {
                error!("Failed to read uname: {}", e);
                return HttpResponse::InternalServerError().body("Internal Server Error");
            }
        };

        if query.format.as_deref() == Some("json") {
            return HttpResponse::Ok().json(&info);
        }

        let mut context = Context::new();
        context.insert("uname", &info.to_string());
        context.insert("info", &info);
        render("demo/sysinfo.html", &context)
    }

    /// Fallback for unmatched routes
    pub async fn not_found(req: HttpRequest) -> impl Responder {
        trace!("No demo route for {}", req.path());
        let mut context = Context::new();
        context.insert("request_path", req.path());
        render_with_status(StatusCode::NOT_FOUND, "demo/404.html", &context)
    }
}

pub fn demo_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .name("index")
            .route(web::get().to(DemoService::index))
            .route(web::head().to(DemoService::index)),
    )
    .service(
        web::resource("/greet")
            .name("greet")
            .route(web::post().to(DemoService::greet))
            .route(web::get().to(DemoService::greet_query)),
    )
    .service(web::resource("/ua").route(web::get().to(DemoService::user_agent)))
    .service(
        web::resource("/sysinfo")
            .name("sysinfo")
            .route(web::get().to(DemoService::sysinfo)),
    );
}
