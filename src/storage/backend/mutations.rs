//! Mutation operations for SeaOrmStorage
//!
//! Bugs are only ever inserted; no shown code path updates or deletes them.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, Set};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_bug, model_to_user};
use crate::errors::{AstrolabError, Result};
use crate::storage::{Bug, NewBug, User};

use migration::entities::{bug, user};

impl SeaOrmStorage {
    /// Insert a bug; `created_at` and `updated_at` are set here
    pub async fn insert_bug(&self, new_bug: NewBug) -> Result<Bug> {
        let owner = user::Entity::find_by_id(new_bug.owner_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AstrolabError::validation(format!("owner {} does not exist", new_bug.owner_id))
            })?;

        let now = Utc::now();
        let active = bug::ActiveModel {
            id: NotSet,
            owner_id: Set(new_bug.owner_id),
            title: Set(new_bug.title),
            state: Set(new_bug.state.into()),
            text: Set(new_bug.text),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&self.db).await?;
        info!("Bug #{} created by {}", model.id, owner.username);
        Ok(model_to_bug(model, Some(owner)))
    }

    pub async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        is_staff: bool,
    ) -> Result<User> {
        if self.find_user_by_username(username).await?.is_some() {
            return Err(AstrolabError::validation(format!(
                "user '{}' already exists",
                username
            )));
        }

        let active = user::ActiveModel {
            id: NotSet,
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            is_staff: Set(is_staff),
            created_at: Set(Utc::now()),
        };

        let model = active.insert(&self.db).await?;
        info!("User '{}' created (staff: {})", model.username, model.is_staff);
        Ok(model_to_user(model))
    }
}
