//! Lazy-initialized service context for the CLI
//!
//! Storage is only opened when a command actually needs the database.

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::errors::Result;
use crate::services::{AccountService, BugService};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// Created once per CLI invocation.
pub struct ServiceContext {
    storage: OnceCell<Arc<SeaOrmStorage>>,
    bug_service: OnceCell<Arc<BugService>>,
    account_service: OnceCell<Arc<AccountService>>,
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceContext {
    pub fn new() -> Self {
        Self {
            storage: OnceCell::new(),
            bug_service: OnceCell::new(),
            account_service: OnceCell::new(),
        }
    }

    /// Create a context around an already opened storage (tests)
    pub fn with_storage(storage: Arc<SeaOrmStorage>) -> Self {
        let ctx = Self::new();
        let _ = ctx.storage.set(storage);
        ctx
    }

    async fn get_storage(&self) -> Result<&Arc<SeaOrmStorage>> {
        self.storage.get_or_try_init(StorageFactory::create).await
    }

    pub async fn get_bug_service(&self) -> Result<&Arc<BugService>> {
        let storage = self.get_storage().await?.clone();
        self.bug_service
            .get_or_try_init(|| async { Ok(Arc::new(BugService::new(storage))) })
            .await
    }

    pub async fn get_account_service(&self) -> Result<&Arc<AccountService>> {
        let storage = self.get_storage().await?.clone();
        self.account_service
            .get_or_try_init(|| async { Ok(Arc::new(AccountService::new(storage))) })
            .await
    }
}
