pub mod json_file;

use crate::errors::TrekError;

pub type Result<T> = std::result::Result<T, TrekError>;

/// Abstraction over persistence backends capable of storing ledger
/// snapshots. Implementations are byte-oriented: callers hand over a
/// serialized snapshot and never learn where the bytes live.
pub trait SnapshotStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, bytes: &[u8]) -> Result<()>;
}

pub use json_file::JsonFileStore;
