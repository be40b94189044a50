//! Durable key-value storage trait.
//!
//! The session layer persists its token and user record through this trait so
//! that browser-style local storage can be swapped for a file or an in-memory
//! map.

use async_trait::async_trait;

use crate::error::Result;

/// Storage key of the opaque session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key of the JSON-serialized [`User`](crate::auth::User).
pub const USER_KEY: &str = "user";

/// String key-value storage that survives process restarts.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
