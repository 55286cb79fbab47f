use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::accounts::repo::{AccountFilter, AccountStore};
use crate::accounts::repo_types::UserAccount;

/// In-memory AccountStore for tests and running without a database.
#[derive(Clone, Debug, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<Mutex<HashMap<Uuid, UserAccount>>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find(&self, filter: &AccountFilter) -> anyhow::Result<Vec<UserAccount>> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| anyhow::anyhow!("account store lock poisoned"))?;
        let mut found: Vec<UserAccount> = accounts
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .map(|mut a| {
                // Stored records never carry the plaintext.
                a.password = None;
                a
            })
            .collect();
        found.sort_by_key(|a| a.created_at);
        Ok(found)
    }

    async fn save(&self, account: &UserAccount) -> anyhow::Result<()> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| anyhow::anyhow!("account store lock poisoned"))?;
        let mut stored = account.clone();
        stored.password = None;
        if let Some(existing) = accounts.get(&stored.id) {
            stored.created_at = existing.created_at;
        }
        accounts.insert(stored.id, stored);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_find_drops_plaintext() {
        let store = MemoryAccountStore::new();
        let mut account = UserAccount::new("ann@example.com");
        account.set_password("hunter2");
        store.save(&account).await.expect("save");

        let found = store.find(&AccountFilter::All).await.expect("find");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, account.id);
        assert_eq!(found[0].password(), None);
        assert!(found[0].authenticate("hunter2"));
    }

    #[tokio::test]
    async fn save_replaces_record_with_same_id() {
        let store = MemoryAccountStore::new();
        let mut account = UserAccount::new("ann@example.com");
        store.save(&account).await.expect("save");

        account.name = "Ann".into();
        store.save(&account).await.expect("save again");

        let found = store.find(&AccountFilter::All).await.expect("find");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ann");
    }
}
