use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use storefront_designer::design::{
    DesignDocument, DesignStore, ProfileSource, ProfileSourceError, StoreError, StoreId,
};
use storefront_designer::error::AppError;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Design documents kept as raw JSON, the way a document column would hold them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDesignStore {
    documents: Arc<Mutex<HashMap<StoreId, Value>>>,
}

impl InMemoryDesignStore {
    pub(crate) fn seed(&self, store_id: StoreId, payload: Value) {
        let mut guard = self.documents.lock().expect("design store mutex poisoned");
        guard.insert(store_id, payload);
    }

    pub(crate) fn raw(&self, store_id: &StoreId) -> Option<Value> {
        let guard = self.documents.lock().expect("design store mutex poisoned");
        guard.get(store_id).cloned()
    }
}

impl DesignStore for InMemoryDesignStore {
    fn load(&self, store_id: &StoreId) -> Result<Option<Value>, StoreError> {
        Ok(self.raw(store_id))
    }

    fn save(&self, store_id: &StoreId, document: &DesignDocument) -> Result<(), StoreError> {
        let payload = serde_json::to_value(document)
            .map_err(|err| StoreError::Rejected(format!("document does not serialize: {err}")))?;
        self.seed(store_id.clone(), payload);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileSource {
    profiles: Arc<Mutex<HashMap<StoreId, Value>>>,
}

impl InMemoryProfileSource {
    pub(crate) fn seed(&self, store_id: StoreId, payload: Value) {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.insert(store_id, payload);
    }
}

impl ProfileSource for InMemoryProfileSource {
    fn profile(&self, store_id: &StoreId) -> Result<Option<Value>, ProfileSourceError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(store_id).cloned())
    }
}

/// Fixture file shape: raw stored designs and profiles keyed by store id.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SeedFile {
    #[serde(default)]
    pub(crate) designs: HashMap<String, Value>,
    #[serde(default)]
    pub(crate) profiles: HashMap<String, Value>,
}

impl SeedFile {
    pub(crate) fn apply(self, store: &InMemoryDesignStore, profiles: &InMemoryProfileSource) {
        let designs = self.designs.len();
        let profile_count = self.profiles.len();
        for (store_id, payload) in self.designs {
            store.seed(StoreId(store_id), payload);
        }
        for (store_id, payload) in self.profiles {
            profiles.seed(StoreId(store_id), payload);
        }
        info!(designs, profiles = profile_count, "seeded in-memory adapters");
    }
}

pub(crate) fn read_json(path: &Path) -> Result<Value, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_seed(path: &Path) -> Result<SeedFile, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
