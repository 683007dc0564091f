pub mod accounts;
pub mod admin;
pub mod bugs;
pub mod demo;
mod views;

pub use accounts::{AccountViews, account_routes};
pub use admin::{AdminViews, admin_routes};
pub use bugs::{BugViews, bug_not_found, bug_routes};
pub use demo::{DemoService, demo_routes};
pub use views::BugView;
