//! HTTP layer: middleware, views, templates and session tokens

pub mod constants;
pub mod jwt;
pub mod middleware;
pub mod services;
pub mod templates;
