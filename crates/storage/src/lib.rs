#![forbid(unsafe_code)]

pub mod history;
pub mod preferences;
pub mod repository;
pub mod sqlite;

pub use history::HistoryStore;
pub use preferences::PreferenceStore;
pub use repository::{BlobStore, InMemoryBlobStore, Storage, StorageError};
