//! Demo web app integration tests

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use astrolab::api::services::{DemoService, demo_routes};

macro_rules! demo_app {
    () => {{
        test::init_service(
            App::new()
                .configure(demo_routes)
                .default_service(web::to(DemoService::not_found)),
        )
        .await
    }};
}

fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[actix_rt::test]
async fn test_index_has_greet_form() {
    let app = demo_app!();

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("name=\"name\""));
}

#[actix_rt::test]
async fn test_greet_get_defaults_to_world() {
    let app = demo_app!();

    let resp = test::call_service(&app, TestRequest::get().uri("/greet").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("Hello, world!"));
}

#[actix_rt::test]
async fn test_greet_post_without_name() {
    let app = demo_app!();

    let req = TestRequest::post().uri("/greet").to_request();
    let body = body_text(&test::call_and_read_body(&app, req).await);

    assert!(body.contains("world"));
}

#[actix_rt::test]
async fn test_greet_post_with_empty_name() {
    let app = demo_app!();

    let req = TestRequest::post()
        .uri("/greet")
        .set_form([("name", "")])
        .to_request();
    let body = body_text(&test::call_and_read_body(&app, req).await);

    assert!(body.contains("Hello, world!"));
}

#[actix_rt::test]
async fn test_greet_post_with_name() {
    let app = demo_app!();

    let req = TestRequest::post()
        .uri("/greet")
        .set_form([("name", "Ferris")])
        .to_request();
    let body = body_text(&test::call_and_read_body(&app, req).await);

    assert!(body.contains("Hello, Ferris!"));
}

#[actix_rt::test]
async fn test_greet_keeps_surrounding_spaces() {
    let app = demo_app!();

    let req = TestRequest::post()
        .uri("/greet")
        .set_form([("name", "  Bob ")])
        .to_request();
    let body = body_text(&test::call_and_read_body(&app, req).await);

    assert!(body.contains("Hello,   Bob !"));
}

#[actix_rt::test]
async fn test_greet_escapes_name() {
    let app = demo_app!();

    let req = TestRequest::post()
        .uri("/greet")
        .set_form([("name", "<b>x</b>")])
        .to_request();
    let body = body_text(&test::call_and_read_body(&app, req).await);

    assert!(!body.contains("<b>x</b>"));
    assert!(body.contains("&lt;b&gt;x"));
}

#[actix_rt::test]
async fn test_ua_echoes_header() {
    let app = demo_app!();

    let req = TestRequest::get()
        .uri("/ua")
        .insert_header(("User-Agent", "curl/8.5.0"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(test::read_body(resp).await, "curl/8.5.0");
}

#[actix_rt::test]
async fn test_ua_without_header_is_empty() {
    let app = demo_app!();

    let req = TestRequest::get().uri("/ua").to_request();
    let body = test::call_and_read_body(&app, req).await;

    assert!(body.is_empty());
}

#[actix_rt::test]
async fn test_sysinfo_json_has_exactly_five_keys() {
    let app = demo_app!();

    let req = TestRequest::get().uri("/sysinfo?format=json").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    let object = json.as_object().expect("JSON object");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["machine", "nodename", "release", "sysname", "version"]
    );
    assert!(object.values().all(Value::is_string));
}

#[actix_rt::test]
async fn test_sysinfo_html() {
    let app = demo_app!();

    let req = TestRequest::get().uri("/sysinfo?format=xml").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("sysname"));
}

#[actix_rt::test]
async fn test_unknown_route_is_404() {
    let app = demo_app!();

    let req = TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("Not found"));
}
