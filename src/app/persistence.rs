//! Best-effort mirroring of [`AppState`] into a [`StateStorage`].
//!
//! Nothing here ever fails the caller: `load`, `save` and `clear` log and
//! swallow errors. The `try_*` variants expose them for tests and tools.

use serde_json::{Map, Value};

use crate::kernel::services::ports::{StateStorage, StorageError};
use crate::kernel::{AppState, PartialAppState};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed state snapshot under `{key}`: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub struct StatePersistence {
    storage: Box<dyn StateStorage>,
    key: String,
}

impl StatePersistence {
    pub fn new(storage: impl StateStorage + 'static, key: impl Into<String>) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn try_load(&self) -> Result<Option<PartialAppState>, PersistenceError> {
        let Some(text) = self.storage.read(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| PersistenceError::Parse {
                key: self.key.clone(),
                source,
            })
    }

    pub fn load(&self) -> Option<PartialAppState> {
        match self.try_load() {
            Ok(partial) => partial,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring persisted state");
                None
            }
        }
    }

    /// Overlays `state` onto whatever object is already stored, so fields
    /// this crate does not know about survive the write.
    pub fn try_save(&self, state: &AppState) -> Result<(), PersistenceError> {
        let mut merged = self.existing_object();
        match serde_json::to_value(state).map_err(PersistenceError::Serialize)? {
            Value::Object(fields) => merged.extend(fields),
            other => {
                tracing::warn!(?other, "state did not serialize to an object");
            }
        }

        let text =
            serde_json::to_string(&Value::Object(merged)).map_err(PersistenceError::Serialize)?;
        self.storage.write(&self.key, &text)?;
        Ok(())
    }

    pub fn save(&self, state: &AppState) -> bool {
        match self.try_save(state) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to persist state");
                false
            }
        }
    }

    pub fn clear(&self) -> bool {
        match self.storage.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to clear persisted state");
                false
            }
        }
    }

    fn existing_object(&self) -> Map<String, Value> {
        let text = match self.storage.read(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return Map::new(),
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "cannot read previous snapshot");
                return Map::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

impl std::fmt::Debug for StatePersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatePersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/persistence.rs"]
mod tests;
