use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::accounts::repo::{AccountFilter, AccountStore};
use crate::accounts::repo_types::UserAccount;
use crate::error::AccountResult;

/// User account schema bound to the store it persists through.
#[derive(Clone)]
pub struct UserSchema {
    store: Arc<dyn AccountStore>,
}

impl UserSchema {
    pub fn create(store: Arc<dyn AccountStore>) -> Self {
        info!("user account schema defined");
        Self { store }
    }

    /// Validates and persists the account.
    pub async fn save(&self, account: &UserAccount) -> AccountResult<()> {
        if let Err(e) = account.validate() {
            warn!(account_id = %account.id, error = %e, "account rejected");
            return Err(e);
        }
        self.store.save(account).await?;
        debug!(account_id = %account.id, "account saved");
        Ok(())
    }

    /// All accounts whose email matches exactly.
    pub async fn find_by_email(&self, email: &str) -> AccountResult<Vec<UserAccount>> {
        let found = self
            .store
            .find(&AccountFilter::Email(email.to_owned()))
            .await?;
        debug!(count = found.len(), "find_by_email");
        Ok(found)
    }

    pub async fn find_all(&self) -> AccountResult<Vec<UserAccount>> {
        let found = self.store.find(&AccountFilter::All).await?;
        debug!(count = found.len(), "find_all");
        Ok(found)
    }
}
