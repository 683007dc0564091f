//! Bug tracker HTTP integration tests
//!
//! Login flow, the login-required views, the 404 page and the admin list.

use std::sync::{Arc, Once};

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use tempfile::TempDir;

use astrolab::api::constants::SESSION_COOKIE_NAME;
use astrolab::api::services::{account_routes, admin_routes, bug_not_found, bug_routes};
use astrolab::config::init_config;
use astrolab::services::{AccountService, BugService, CreateBugRequest};
use astrolab::storage::SeaOrmStorage;

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

struct TestEnv {
    _dir: TempDir,
    bugs: Arc<BugService>,
    accounts: Arc<AccountService>,
}

async fn init_test_env() -> TestEnv {
    init_static_config();

    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("bugs.db").display());
    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("Failed to create storage"),
    );

    TestEnv {
        _dir: dir,
        bugs: Arc::new(BugService::new(storage.clone())),
        accounts: Arc::new(AccountService::new(storage)),
    }
}

macro_rules! bugs_app {
    ($env:expr) => {{
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.bugs.clone()))
                .app_data(web::Data::new($env.accounts.clone()))
                .configure(account_routes)
                .configure(admin_routes)
                .configure(bug_routes)
                .default_service(web::to(bug_not_found)),
        )
        .await
    }};
}

async fn add_bug(env: &TestEnv, owner: &str, title: &str) -> i32 {
    env.bugs
        .create(CreateBugRequest {
            owner: owner.to_string(),
            title: title.to_string(),
            state: None,
            text: format!("Details for {}", title),
        })
        .await
        .expect("Failed to create bug")
        .id
}

/// Log in through the form and return the session cookie
macro_rules! login {
    ($app:expr, $user:expr, $password:expr) => {{
        let req = TestRequest::post()
            .uri("/accounts/login/")
            .set_form([("username", $user), ("password", $password), ("next", "/")])
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        resp.response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE_NAME)
            .map(Cookie::into_owned)
            .expect("login sets the session cookie")
    }};
}

fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// =============================================================================
// Login required
// =============================================================================

#[actix_rt::test]
async fn test_index_redirects_to_login() {
    let env = init_test_env().await;
    let app = bugs_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = resp.headers().get(LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "/accounts/login/?next=%2F");
}

#[actix_rt::test]
async fn test_detail_redirects_with_next() {
    let env = init_test_env().await;
    let app = bugs_app!(env);

    let resp = test::call_service(&app, TestRequest::get().uri("/1/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = resp.headers().get(LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "/accounts/login/?next=%2F1%2F");
}

#[actix_rt::test]
async fn test_invalid_token_redirects() {
    let env = init_test_env().await;
    let app = bugs_app!(env);

    let req = TestRequest::get()
        .uri("/")
        .cookie(Cookie::new(SESSION_COOKIE_NAME, "not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_rt::test]
async fn test_login_page_renders() {
    let env = init_test_env().await;
    let app = bugs_app!(env);

    let req = TestRequest::get()
        .uri("/accounts/login/?next=/3/")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("name=\"next\""));
    // tera escapes slashes in attribute values
    assert!(body.contains("value=\"&#x2F;3&#x2F;\""));
}

#[actix_rt::test]
async fn test_wrong_password_sets_no_cookie() {
    let env = init_test_env().await;
    env.accounts.create_user("alice", "correct", false).await.unwrap();
    let app = bugs_app!(env);

    let req = TestRequest::post()
        .uri("/accounts/login/")
        .set_form([("username", "alice"), ("password", "wrong")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.response()
            .cookies()
            .all(|c| c.name() != SESSION_COOKIE_NAME)
    );
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("Please enter a correct username and password."));
}

#[actix_rt::test]
async fn test_login_redirects_to_next() {
    let env = init_test_env().await;
    env.accounts.create_user("alice", "pw", false).await.unwrap();
    let app = bugs_app!(env);

    let req = TestRequest::post()
        .uri("/accounts/login/")
        .set_form([("username", "alice"), ("password", "pw"), ("next", "/7/")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/7/");
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .expect("session cookie");
    assert_eq!(cookie.http_only(), Some(true));
}

// =============================================================================
// Views
// =============================================================================

#[actix_rt::test]
async fn test_index_shows_five_latest_newest_first() {
    let env = init_test_env().await;
    env.accounts.create_user("alice", "pw", false).await.unwrap();
    for i in 1..=7 {
        add_bug(&env, "alice", &format!("Issue number {}", i)).await;
    }
    let app = bugs_app!(env);
    let cookie = login!(app, "alice", "pw");

    let req = TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);

    let positions: Vec<usize> = (3..=7)
        .rev()
        .map(|i| {
            body.find(&format!("Issue number {}", i))
                .unwrap_or_else(|| panic!("Issue number {} missing", i))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!body.contains("Issue number 2"));
    assert!(!body.contains("Issue number 1"));
}

#[actix_rt::test]
async fn test_index_without_bugs() {
    let env = init_test_env().await;
    env.accounts.create_user("alice", "pw", false).await.unwrap();
    let app = bugs_app!(env);
    let cookie = login!(app, "alice", "pw");

    let req = TestRequest::get().uri("/").cookie(cookie).to_request();
    let body = body_text(&test::call_and_read_body(&app, req).await);

    assert!(body.contains("No bugs are available."));
}

#[actix_rt::test]
async fn test_detail_shows_bug() {
    let env = init_test_env().await;
    env.accounts.create_user("alice", "pw", false).await.unwrap();
    let id = add_bug(&env, "alice", "Login button is blue").await;
    let app = bugs_app!(env);
    let cookie = login!(app, "alice", "pw");

    let req = TestRequest::get()
        .uri(&format!("/{}/", id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("Login button is blue"));
    assert!(body.contains("Details for Login button is blue"));
}

#[actix_rt::test]
async fn test_detail_missing_is_404() {
    let env = init_test_env().await;
    env.accounts.create_user("alice", "pw", false).await.unwrap();
    let app = bugs_app!(env);
    let cookie = login!(app, "alice", "pw");

    let req = TestRequest::get().uri("/999/").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get().uri("/abc/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_bearer_token_is_accepted() {
    let env = init_test_env().await;
    env.accounts.create_user("alice", "pw", false).await.unwrap();
    let app = bugs_app!(env);
    let cookie = login!(app, "alice", "pw");

    let req = TestRequest::get()
        .uri("/")
        .insert_header(("Authorization", format!("Bearer {}", cookie.value())))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_unknown_path_is_404() {
    let env = init_test_env().await;
    let app = bugs_app!(env);

    let req = TestRequest::get().uri("/no/such/page").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_logout_clears_cookie() {
    let env = init_test_env().await;
    let app = bugs_app!(env);

    let req = TestRequest::post().uri("/accounts/logout/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/accounts/login/");
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .expect("removal cookie");
    assert_eq!(cookie.value(), "");
}

// =============================================================================
// Admin
// =============================================================================

#[actix_rt::test]
async fn test_admin_list_forbidden_for_regular_user() {
    let env = init_test_env().await;
    env.accounts.create_user("alice", "pw", false).await.unwrap();
    let app = bugs_app!(env);
    let cookie = login!(app, "alice", "pw");

    let req = TestRequest::get().uri("/admin/bugs/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_admin_list_shows_every_bug_to_staff() {
    let env = init_test_env().await;
    env.accounts.create_user("root", "pw", true).await.unwrap();
    for i in 1..=7 {
        add_bug(&env, "root", &format!("Issue number {}", i)).await;
    }
    let app = bugs_app!(env);
    let cookie = login!(app, "root", "pw");

    let req = TestRequest::get().uri("/admin/bugs/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    for i in 1..=7 {
        assert!(body.contains(&format!("Issue number {}", i)));
    }
    assert!(body.contains("7 bugs"));
    assert!(body.contains("<th>title</th>"));
}
