use crate::accounts::password;
use crate::accounts::repo_types::UserAccount;
use crate::error::{AccountError, AccountResult, EMAIL_REQUIRED};
use tracing::debug;

impl UserAccount {
    /// New account with every field at its default and the given email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Assigns a plaintext password: fresh salt, fresh hash.
    pub fn set_password(&mut self, plain: impl Into<String>) {
        let plain = plain.into();
        self.salt = password::make_salt();
        self.hashed_password = self.encrypt_password(&plain, None);
        self.password = Some(plain);
        debug!(account_id = %self.id, "password assigned");
    }

    /// Plaintext set on this instance, if any. Records loaded from storage have none.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Hashes `plain` with `salt`, or with this account's salt when `salt` is absent or empty.
    pub fn encrypt_password(&self, plain: &str, salt: Option<&str>) -> String {
        let salt = salt.filter(|s| !s.is_empty()).unwrap_or(&self.salt);
        password::encrypt_password(plain, salt)
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Hex HMAC-SHA1 of the last assigned password.
    pub fn hashed_password(&self) -> &str {
        &self.hashed_password
    }

    /// Checks `plain` against this account's stored salt and hash.
    pub fn authenticate(&self, plain: &str) -> bool {
        let ok = password::verify_password(plain, &self.salt, &self.hashed_password);
        debug!(account_id = %self.id, ok, "authenticate");
        ok
    }

    /// Checks `plain` against an externally supplied salt and hash.
    ///
    /// An empty `salt` falls back to [`UserAccount::authenticate`].
    pub fn authenticate_with(&self, plain: &str, salt: &str, expected_hash: &str) -> bool {
        if salt.is_empty() {
            return self.authenticate(plain);
        }
        let ok = password::verify_password(plain, salt, expected_hash);
        debug!(account_id = %self.id, ok, "authenticate with supplied salt");
        ok
    }

    pub fn validate(&self) -> AccountResult<()> {
        if self.email.is_empty() {
            return Err(AccountError::Validation {
                path: "email",
                message: EMAIL_REQUIRED,
            });
        }
        Ok(())
    }
}
