//! Login accounts: creation and password checks

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{AstrolabError, Result};
use crate::storage::{SeaOrmStorage, User};
use crate::utils::password::{hash_password, verify_password};

pub struct AccountService {
    storage: Arc<SeaOrmStorage>,
}

impl AccountService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn create_user(&self, username: &str, password: &str, is_staff: bool) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AstrolabError::validation("username must not be empty"));
        }
        if password.is_empty() {
            return Err(AstrolabError::validation("password must not be empty"));
        }

        let hash = hash_password(password)?;
        self.storage.insert_user(username, &hash, is_staff).await
    }

    /// Returns the user when the password matches, `None` otherwise
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.storage.find_user_by_username(username).await? else {
            debug!("Login attempt for unknown user '{}'", username);
            return Ok(None);
        };

        if verify_password(password, &user.password_hash)? {
            info!("User '{}' logged in", user.username);
            Ok(Some(user))
        } else {
            debug!("Wrong password for '{}'", username);
            Ok(None)
        }
    }
}
