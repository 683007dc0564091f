//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::{debug, trace};

use super::SeaOrmStorage;
use super::converters::{model_to_bug, model_to_user};
use crate::errors::Result;
use crate::storage::{Bug, User};

use migration::entities::{bug, user};

impl SeaOrmStorage {
    /// Newest bugs first, at most `limit`
    pub async fn latest_bugs(&self, limit: u64) -> Result<Vec<Bug>> {
        let rows = bug::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(bug::Column::CreatedAt)
            .order_by_desc(bug::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        trace!("Loaded {} latest bugs (limit {})", rows.len(), limit);
        Ok(rows
            .into_iter()
            .map(|(bug, owner)| model_to_bug(bug, owner))
            .collect())
    }

    /// Every bug, newest first
    pub async fn all_bugs(&self) -> Result<Vec<Bug>> {
        let rows = bug::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(bug::Column::CreatedAt)
            .order_by_desc(bug::Column::Id)
            .all(&self.db)
            .await?;

        debug!("Loaded {} bugs", rows.len());
        Ok(rows
            .into_iter()
            .map(|(bug, owner)| model_to_bug(bug, owner))
            .collect())
    }

    pub async fn get_bug(&self, id: i32) -> Result<Option<Bug>> {
        let row = bug::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(bug, owner)| model_to_bug(bug, owner)))
    }

    pub async fn count_bugs(&self) -> Result<u64> {
        Ok(bug::Entity::find().count(&self.db).await?)
    }

    pub async fn find_user(&self, id: i32) -> Result<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_user))
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_user))
    }
}
