//! Bug tracker service
//!
//! Business logic shared by the HTTP views and the `bugs` CLI commands.

use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{AstrolabError, Result};
use crate::storage::{Bug, BugState, NewBug, SeaOrmStorage};

/// Longest accepted title, same as the column width
pub const MAX_TITLE_LEN: usize = 256;

/// Request to create a bug
#[derive(Debug, Clone)]
pub struct CreateBugRequest {
    /// Username of the owner
    pub owner: String,
    pub title: String,
    /// "open" or "closed"; `None` means open
    pub state: Option<String>,
    pub text: String,
}

pub struct BugService {
    storage: Arc<SeaOrmStorage>,
}

impl BugService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Index view data: newest `limit` bugs
    pub async fn latest(&self, limit: u64) -> Result<Vec<Bug>> {
        self.storage.latest_bugs(limit).await
    }

    /// Detail view data; missing ids are `NotFound`
    pub async fn detail(&self, id: i32) -> Result<Bug> {
        self.storage
            .get_bug(id)
            .await?
            .ok_or_else(|| AstrolabError::not_found(format!("bug {} does not exist", id)))
    }

    /// Admin list data
    pub async fn all(&self) -> Result<Vec<Bug>> {
        self.storage.all_bugs().await
    }

    pub async fn count(&self) -> Result<u64> {
        self.storage.count_bugs().await
    }

    pub async fn create(&self, req: CreateBugRequest) -> Result<Bug> {
        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(AstrolabError::validation("title must not be empty"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AstrolabError::validation(format!(
                "title is longer than {} characters",
                MAX_TITLE_LEN
            )));
        }

        let state = match req.state.as_deref() {
            None | Some("") => BugState::default(),
            Some(s) => BugState::from_str(s).map_err(|_| {
                AstrolabError::validation(format!(
                    "invalid state '{}', expected 'open' or 'closed'",
                    s
                ))
            })?,
        };

        let owner = self
            .storage
            .find_user_by_username(&req.owner)
            .await?
            .ok_or_else(|| {
                AstrolabError::validation(format!("owner '{}' does not exist", req.owner))
            })?;

        debug!("Creating bug '{}' for {}", title, owner.username);
        let bug = self
            .storage
            .insert_bug(NewBug {
                owner_id: owner.id,
                title,
                state,
                text: req.text,
            })
            .await?;

        info!("{} created", bug);
        Ok(bug)
    }
}
