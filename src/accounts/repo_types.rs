use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub const PROVIDER_LOCAL: &str = "local";
pub const PROVIDER_FACEBOOK: &str = "facebook";
pub const PROVIDER_GOOGLE: &str = "google";

/// User account record in the `user_accounts` table.
#[derive(Clone, Serialize, Deserialize, FromRow)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub(crate) hashed_password: String, // hex HMAC-SHA1, never set directly
    pub name: String,
    #[serde(skip_serializing, default)]
    pub(crate) salt: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub provider: String,             // local, facebook, google
    pub auth_token: String,
    pub facebook: Option<serde_json::Value>,
    pub google: Option<serde_json::Value>,
    /// Plaintext from the last `set_password` on this instance. Never stored.
    #[serde(skip)]
    #[sqlx(skip)]
    pub(crate) password: Option<String>,
}

impl Default for UserAccount {
    fn default() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            email: String::new(),
            hashed_password: String::new(),
            name: String::new(),
            salt: String::new(),
            created_at: now,
            updated_at: now,
            provider: String::new(),
            auth_token: String::new(),
            facebook: None,
            google: None,
            password: None,
        }
    }
}

// Secrets stay out of `{:?}`, which ends up in log fields.
impl fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("hashed_password", &"<redacted>")
            .field("name", &self.name)
            .field("salt", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("provider", &self.provider)
            .field("auth_token", &"<redacted>")
            .field("facebook", &self.facebook)
            .field("google", &self.google)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
