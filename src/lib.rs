//! astrolab - small web apps and HTTP helpers
//!
//! One binary hosts several unrelated programs:
//! - a login-protected bug tracker (`bugs`)
//! - a demo web app with greeting, user agent and uname pages (`demo`)
//! - a bridge into a cgo shared library (`native`)
//! - HTTP glue for Go `/debug/vars` and the tailnet whois proxy (`vars`, `whois`)
//!
//! # Features
//! - **server**: HTTP server modes (default)
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `storage`: SeaORM storage for bugs and users
//! - `services`: business logic shared by views and CLI
//! - `api`: HTTP views, templates, sessions and middleware
//! - `client`: HTTP glue clients and the lazy CLI service context
//! - `native`: shared library loading
//! - `interfaces`: CLI command implementations
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod native;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
