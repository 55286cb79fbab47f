use thiserror::Error;

pub const EMAIL_REQUIRED: &str = "email must not be empty";

#[derive(Debug, Error)]
pub enum AccountError {
    /// A field rule rejected the record before it reached the store.
    #[error("validation failed for `{path}`: {message}")]
    Validation {
        path: &'static str,
        message: &'static str,
    },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type AccountResult<T> = Result<T, AccountError>;
