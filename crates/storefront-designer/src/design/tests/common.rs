use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::design::document::{DesignDocument, Section, SectionStyleOverride};
use crate::design::reconcile::reconcile;
use crate::design::store::{
    DesignStore, ProfileSource, ProfileSourceError, StoreError, StoreId,
};
use crate::design::{design_router, DesignService};

pub(super) fn store_id() -> StoreId {
    StoreId("store-042".to_string())
}

pub(super) fn section(id: &str, order: u32) -> Section {
    Section {
        id: id.to_string(),
        title: String::new(),
        order,
        visible: true,
        settings: SectionStyleOverride::default(),
    }
}

pub(super) fn default_document() -> DesignDocument {
    reconcile(None)
}

/// Ids of the non-header sections in page order.
pub(super) fn page_order(document: &DesignDocument) -> Vec<String> {
    document
        .orderable()
        .into_iter()
        .map(|section| section.id.clone())
        .collect()
}

/// A legacy stored payload: aliased ids, a retired section, a duplicate, a
/// header at the wrong position and an unknown forward-compatible section.
pub(super) fn legacy_payload() -> Value {
    json!({
        "globalSettings": { "mainColor": "#ff0066", "borderRadius": "12px" },
        "sections": [
            { "id": "hero", "title": "", "order": 1, "visible": true },
            { "id": "ranking", "title": "ランキング", "order": 2 },
            { "id": "salary", "title": "お給料", "order": 3, "visible": false },
            { "id": "salary", "title": "重複", "order": 4 },
            { "id": "header", "title": "", "order": 9, "visible": false },
            { "id": "seasonal_banner", "title": "季節のお知らせ", "order": 5 },
            { "id": 42, "title": "broken" }
        ]
    })
}

pub(super) fn profile_payload() -> Value {
    json!({
        "store_name": "Club Aurora",
        "area": "渋谷",
        "catchphrase": "未経験から始めよう",
        "salary_guarantees": [
            { "label": "日給保証", "amount": "30,000円", "hours": 6 },
            { "label": "体験入店", "amount": 0 }
        ],
        "days_available": "月,火,水",
        "business_hours": "10時-22時",
        "contact_phone": "03-1234-5678",
        "emails": "[\"info@aurora.example\"]",
        "sns_links": "{\"instagram\": \"https://instagram.com/aurora\"}",
        "recent_posts": [
            { "title": "新人入店", "body": "<p>今週から新しい仲間が加わりました</p>", "published_at": "2025-09-24" }
        ]
    })
}

#[derive(Default, Clone)]
pub(super) struct MemoryDesignStore {
    inner: Arc<Mutex<HashMap<StoreId, Value>>>,
}

impl MemoryDesignStore {
    pub(super) fn with_payload(store_id: &StoreId, payload: Value) -> Self {
        let store = Self::default();
        store
            .inner
            .lock()
            .expect("design store mutex poisoned")
            .insert(store_id.clone(), payload);
        store
    }

    pub(super) fn stored(&self, store_id: &StoreId) -> Option<Value> {
        self.inner
            .lock()
            .expect("design store mutex poisoned")
            .get(store_id)
            .cloned()
    }
}

impl DesignStore for MemoryDesignStore {
    fn load(&self, store_id: &StoreId) -> Result<Option<Value>, StoreError> {
        Ok(self.stored(store_id))
    }

    fn save(&self, store_id: &StoreId, document: &DesignDocument) -> Result<(), StoreError> {
        let payload =
            serde_json::to_value(document).map_err(|err| StoreError::Rejected(err.to_string()))?;
        self.inner
            .lock()
            .expect("design store mutex poisoned")
            .insert(store_id.clone(), payload);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl DesignStore for UnavailableStore {
    fn load(&self, _store_id: &StoreId) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn save(&self, _store_id: &StoreId, _document: &DesignDocument) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub(super) struct RejectingStore;

impl DesignStore for RejectingStore {
    fn load(&self, _store_id: &StoreId) -> Result<Option<Value>, StoreError> {
        Ok(None)
    }

    fn save(&self, _store_id: &StoreId, _document: &DesignDocument) -> Result<(), StoreError> {
        Err(StoreError::Rejected("row level security".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    inner: Arc<Mutex<HashMap<StoreId, Value>>>,
}

impl MemoryProfiles {
    pub(super) fn with_profile(store_id: &StoreId, payload: Value) -> Self {
        let profiles = Self::default();
        profiles
            .inner
            .lock()
            .expect("profile mutex poisoned")
            .insert(store_id.clone(), payload);
        profiles
    }
}

impl ProfileSource for MemoryProfiles {
    fn profile(&self, store_id: &StoreId) -> Result<Option<Value>, ProfileSourceError> {
        Ok(self
            .inner
            .lock()
            .expect("profile mutex poisoned")
            .get(store_id)
            .cloned())
    }
}

pub(super) struct OfflineProfiles;

impl ProfileSource for OfflineProfiles {
    fn profile(&self, _store_id: &StoreId) -> Result<Option<Value>, ProfileSourceError> {
        Err(ProfileSourceError::Unavailable("timeout".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<DesignService<MemoryDesignStore, MemoryProfiles>>,
    MemoryDesignStore,
) {
    let store = MemoryDesignStore::with_payload(&store_id(), legacy_payload());
    let profiles = MemoryProfiles::with_profile(&store_id(), profile_payload());
    let service = Arc::new(DesignService::new(
        Arc::new(store.clone()),
        Arc::new(profiles),
    ));
    (service, store)
}

pub(super) fn design_router_with_service<S, P>(service: Arc<DesignService<S, P>>) -> axum::Router
where
    S: DesignStore + 'static,
    P: ProfileSource + 'static,
{
    design_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
