pub mod memory;
mod model;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod schema;

pub use memory::MemoryAccountStore;
pub use repo::{AccountFilter, AccountStore, PgAccountStore};
pub use repo_types::UserAccount;
pub use schema::UserSchema;
