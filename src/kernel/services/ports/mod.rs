//! Service ports: traits + data contracts.

pub mod settings;
pub mod storage;

pub use settings::{Settings, DEFAULT_STORAGE_KEY};
pub use storage::{Result as StorageResult, StateStorage, StorageError};
