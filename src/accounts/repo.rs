use crate::accounts::repo_types::UserAccount;
use async_trait::async_trait;
use sqlx::PgPool;

/// Query shapes the schema needs from its store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFilter {
    All,
    Email(String),
}

impl AccountFilter {
    pub fn matches(&self, account: &UserAccount) -> bool {
        match self {
            AccountFilter::All => true,
            AccountFilter::Email(email) => account.email == *email,
        }
    }
}

/// Persistence boundary for user accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find(&self, filter: &AccountFilter) -> anyhow::Result<Vec<UserAccount>>;
    /// Insert or replace the record with the same id.
    async fn save(&self, account: &UserAccount) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find(&self, filter: &AccountFilter) -> anyhow::Result<Vec<UserAccount>> {
        let rows = match filter {
            AccountFilter::All => {
                sqlx::query_as::<_, UserAccount>(
                    r#"
                    SELECT id, email, hashed_password, name, salt, created_at, updated_at,
                           provider, auth_token, facebook, google
                    FROM user_accounts
                    ORDER BY created_at
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
            AccountFilter::Email(email) => {
                sqlx::query_as::<_, UserAccount>(
                    r#"
                    SELECT id, email, hashed_password, name, salt, created_at, updated_at,
                           provider, auth_token, facebook, google
                    FROM user_accounts
                    WHERE email = $1
                    ORDER BY created_at
                    "#,
                )
                .bind(email)
                .fetch_all(&self.db)
                .await?
            }
        };
        Ok(rows)
    }

    async fn save(&self, account: &UserAccount) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_accounts
                (id, email, hashed_password, name, salt, created_at, updated_at,
                 provider, auth_token, facebook, google)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                hashed_password = EXCLUDED.hashed_password,
                name = EXCLUDED.name,
                salt = EXCLUDED.salt,
                updated_at = EXCLUDED.updated_at,
                provider = EXCLUDED.provider,
                auth_token = EXCLUDED.auth_token,
                facebook = EXCLUDED.facebook,
                google = EXCLUDED.google
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.hashed_password)
        .bind(&account.name)
        .bind(&account.salt)
        .bind(account.created_at)
        .bind(account.updated_at)
        .bind(&account.provider)
        .bind(&account.auth_token)
        .bind(&account.facebook)
        .bind(&account.google)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_filter_is_exact_match() {
        let account = UserAccount::new("ann@example.com");
        assert!(AccountFilter::All.matches(&account));
        assert!(AccountFilter::Email("ann@example.com".into()).matches(&account));
        assert!(!AccountFilter::Email("ANN@example.com".into()).matches(&account));
        assert!(!AccountFilter::Email("ann@example".into()).matches(&account));
    }
}
