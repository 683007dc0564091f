//! Login and logout

use actix_web::{
    HttpResponse, Responder,
    cookie::{Cookie, SameSite, time::Duration},
    http::header::LOCATION,
    web,
};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;
use tracing::{error, info};

use crate::api::constants::{LOGIN_URL, LOGOUT_URL, REDIRECT_FIELD_NAME, SESSION_COOKIE_NAME};
use crate::api::jwt::get_jwt_service;
use crate::api::templates::render;
use crate::config::get_config;
use crate::services::AccountService;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Only local absolute paths are followed after login
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") && !n.starts_with("/\\") => n,
        _ => "/",
    }
}

fn login_page(next: &str, error_message: Option<&str>, username: &str) -> HttpResponse {
    let mut context = Context::new();
    context.insert("next", next);
    context.insert("redirect_field_name", REDIRECT_FIELD_NAME);
    context.insert("login_url", LOGIN_URL);
    context.insert("username", username);
    if let Some(message) = error_message {
        context.insert("error", message);
    }
    render("registration/login.html", &context)
}

fn session_cookie(value: String) -> Cookie<'static> {
    let config = get_config();
    Cookie::build(SESSION_COOKIE_NAME, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.auth.cookie_secure)
        .max_age(Duration::minutes(
            get_jwt_service().session_minutes() as i64,
        ))
        .finish()
}

pub struct AccountViews;

impl AccountViews {
    /// `GET /accounts/login/`
    pub async fn login_form(query: web::Query<NextQuery>) -> impl Responder {
        login_page(safe_next(query.next.as_deref()), None, "")
    }

    /// `POST /accounts/login/`
    pub async fn login(
        service: web::Data<Arc<AccountService>>,
        form: web::Form<LoginForm>,
    ) -> impl Responder {
        let form = form.into_inner();
        let next = safe_next(form.next.as_deref()).to_string();

        let user = match service.authenticate(&form.username, &form.password).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return login_page(
                    &next,
                    Some("Please enter a correct username and password."),
                    &form.username,
                );
            }
            Err(e) => {
                error!("Login failed for '{}': {}", form.username, e);
                return HttpResponse::InternalServerError().body("Internal Server Error");
            }
        };

        let token = match get_jwt_service().generate_session_token(&user) {
            Ok(token) => token,
            Err(e) => {
                error!("Failed to issue session token: {}", e);
                return HttpResponse::InternalServerError().body("Internal Server Error");
            }
        };

        info!("Session started for {}", user.username);
        HttpResponse::Found()
            .insert_header((LOCATION, next))
            .cookie(session_cookie(token))
            .finish()
    }

    /// `POST /accounts/logout/`
    pub async fn logout() -> impl Responder {
        let mut cookie = session_cookie(String::new());
        cookie.make_removal();

        HttpResponse::Found()
            .insert_header((LOCATION, LOGIN_URL))
            .cookie(cookie)
            .finish()
    }
}

pub fn account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(LOGIN_URL)
            .name("login")
            .route(web::get().to(AccountViews::login_form))
            .route(web::post().to(AccountViews::login)),
    )
    .service(
        web::resource(LOGOUT_URL)
            .name("logout")
            .route(web::post().to(AccountViews::logout)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_must_be_a_local_path() {
        assert_eq!(safe_next(Some("/3/")), "/3/");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(Some("https://evil.example/")), "/");
        assert_eq!(safe_next(Some("")), "/");
        assert_eq!(safe_next(None), "/");
    }
}
