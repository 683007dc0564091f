pub mod auth;

pub use auth::{AuthenticatedUser, LoginRequired, login_redirect_url};
