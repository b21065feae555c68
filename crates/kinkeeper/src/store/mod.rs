//! Persistent key-value store.
//!
//! All state persists as a handful of independently keyed text blobs: the
//! serialized member list, the opaque profile blob, and two settings
//! values. The [`Store`] trait is the seam that keeps the domain logic
//! testable without a real database.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;

/// Key holding the JSON-serialized member list.
pub const MEMBERS_KEY: &str = "familyMembers";

/// Key holding the opaque "your profile" blob.
pub const PROFILE_KEY: &str = "yourProfile";

/// Key holding the tree layout setting.
pub const LAYOUT_KEY: &str = "treeLayout";

/// Key holding the color theme setting.
pub const THEME_KEY: &str = "colorTheme";

/// String key-value persistence.
///
/// Writes are full-value and synchronous; callers above the repository
/// treat failures as best-effort (logged, not fatal).
pub trait Store: Send + std::fmt::Debug {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    fn remove(&mut self, key: &str) -> Result<()>;
}
