//! Service layer for business logic
//!
//! Shared between the HTTP views and the CLI commands.

mod account_service;
mod bug_service;
pub mod sysinfo;

pub use account_service::AccountService;
pub use bug_service::{BugService, CreateBugRequest, MAX_TITLE_LEN};
pub use sysinfo::{Uname, uname};
