//! Template rendering
//!
//! Templates live in `templates/` and are embedded into the binary with
//! rust-embed, then compiled once into a Tera engine. `.html` templates are
//! auto-escaped.

use std::sync::OnceLock;

use actix_web::{HttpResponse, http::StatusCode};
use rust_embed::Embed;
use tera::{Context, Tera};
use tracing::{debug, error};

use crate::errors::{AstrolabError, Result};

#[derive(Embed)]
#[folder = "templates/"]
struct TemplateAssets;

static ENGINE: OnceLock<std::result::Result<Tera, AstrolabError>> = OnceLock::new();

fn build_engine() -> Result<Tera> {
    let mut sources = Vec::new();
    for name in TemplateAssets::iter() {
        if let Some(file) = TemplateAssets::get(&name) {
            let body = String::from_utf8_lossy(&file.data).into_owned();
            sources.push((name.to_string(), body));
        }
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(sources)?;
    debug!("Loaded {} templates", tera.get_template_names().count());
    Ok(tera)
}

/// Compiled template engine
pub fn engine() -> Result<&'static Tera> {
    ENGINE.get_or_init(build_engine).as_ref().map_err(Clone::clone)
}

pub fn render_to_string(name: &str, context: &Context) -> Result<String> {
    Ok(engine()?.render(name, context)?)
}

/// Render `name` into a `200 OK` HTML response
pub fn render(name: &str, context: &Context) -> HttpResponse {
    render_with_status(StatusCode::OK, name, context)
}

pub fn render_with_status(status: StatusCode, name: &str, context: &Context) -> HttpResponse {
    match render_to_string(name, context) {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            error!("Failed to render template {}: {}", name, e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Template rendering failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_compile() {
        let tera = engine().unwrap();
        let names: Vec<_> = tera.get_template_names().collect();
        for expected in [
            "bugs/index.html",
            "bugs/detail.html",
            "registration/login.html",
            "admin/bug_list.html",
            "demo/index.html",
            "demo/greet.html",
            "demo/sysinfo.html",
            "demo/404.html",
        ] {
            assert!(names.contains(&expected), "missing template {}", expected);
        }
    }

    #[test]
    fn values_are_escaped() {
        let mut context = Context::new();
        context.insert("name", "<script>");
        let html = render_to_string("demo/greet.html", &context).unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let err = render_to_string("nope.html", &Context::new()).unwrap_err();
        assert_eq!(err.code(), "E010");
    }
}
