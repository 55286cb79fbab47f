use crate::accounts::{AccountStore, MemoryAccountStore, PgAccountStore, UserSchema};
use crate::config::AppConfig;
use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Option<PgPool>,
    pub config: Arc<AppConfig>,
    pub users: UserSchema,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let Some(url) = config.database_url.clone() else {
            tracing::warn!("DATABASE_URL not set; accounts are kept in memory");
            return Ok(Self::in_memory(config));
        };

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&url)
            .await
            .context("connect to database")?;

        let store = Arc::new(PgAccountStore::new(db.clone())) as Arc<dyn AccountStore>;
        Ok(Self {
            db: Some(db),
            config,
            users: UserSchema::create(store),
        })
    }

    pub fn in_memory(config: Arc<AppConfig>) -> Self {
        let store = Arc::new(MemoryAccountStore::new()) as Arc<dyn AccountStore>;
        Self {
            db: None,
            config,
            users: UserSchema::create(store),
        }
    }

    pub fn fake() -> Self {
        Self::in_memory(Arc::new(AppConfig {
            database_url: None,
            max_connections: 1,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::UserAccount;

    #[tokio::test]
    async fn fake_state_round_trips_accounts() {
        let state = AppState::fake();
        assert!(state.db.is_none());

        let mut account = UserAccount::new("ann@example.com");
        account.set_password("hunter2");
        state.users.save(&account).await.expect("save");

        let found = state.users.find_by_email("ann@example.com").await.expect("find");
        assert_eq!(found.len(), 1);
        assert!(found[0].authenticate("hunter2"));
    }
}
