use std::{collections::BTreeMap, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::ServiceError;

/// JSON file holding named slots, each slot one serialized value.
///
/// Plays the role of a device-local key-value area: callers pick a slot name
/// (e.g. `services_data`) and read or overwrite the whole value stored there.
/// Every write rewrites the full file.
pub struct JsonSlotStore<V> {
    slots: RwLock<BTreeMap<String, V>>,
    file_path: PathBuf,
}

impl<V> JsonSlotStore<V>
where
    V: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync,
{
    /// Open the store at `path`, creating an empty file if it is missing.
    /// A file that does not parse is logged and treated as empty; it is
    /// replaced on the next write.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(storage_err)?;
            }
        }

        let slots: BTreeMap<String, V> = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(slots) => slots,
                Err(e) => {
                    warn!(path = %file_path.display(), error = %e, "slot file unreadable; starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: BTreeMap<String, V> = BTreeMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty).map_err(storage_err)?)
                    .await
                    .map_err(storage_err)?;
                empty
            }
            Err(e) => return Err(storage_err(e)),
        };

        Ok(Arc::new(Self { slots: RwLock::new(slots), file_path }))
    }

    async fn flush(&self, slots: &BTreeMap<String, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(slots).map_err(storage_err)?;
        fs::write(&self.file_path, data).await.map_err(storage_err)
    }

    pub async fn get(&self, slot: &str) -> Option<V> {
        self.slots.read().await.get(slot).cloned()
    }

    /// Overwrite a slot and persist the whole file.
    pub async fn put(&self, slot: &str, value: V) -> Result<(), ServiceError> {
        let mut slots = self.slots.write().await;
        slots.insert(slot.to_string(), value);
        self.flush(&slots).await
    }

    /// Clear a slot and persist; returns whether it held a value.
    pub async fn remove(&self, slot: &str) -> Result<bool, ServiceError> {
        let mut slots = self.slots.write().await;
        let existed = slots.remove(slot).is_some();
        if existed {
            self.flush(&slots).await?;
        }
        Ok(existed)
    }

    pub async fn slot_names(&self) -> Vec<String> {
        self.slots.read().await.keys().cloned().collect()
    }
}

fn storage_err<E: std::fmt::Display>(e: E) -> ServiceError {
    ServiceError::Storage(e.to_string())
}
