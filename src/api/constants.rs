//! API 模块常量定义
//!
//! 认证、Cookie 和路由相关的硬编码常量。

/// Session Cookie 名称
pub const SESSION_COOKIE_NAME: &str = "astrolab_session";

/// Login page; unauthenticated requests are redirected here
pub const LOGIN_URL: &str = "/accounts/login/";

pub const LOGOUT_URL: &str = "/accounts/logout/";

/// Query parameter carrying the page to return to after login
pub const REDIRECT_FIELD_NAME: &str = "next";
