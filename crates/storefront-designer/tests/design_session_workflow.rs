//! Integration specifications for the design manager: load, edit, save and
//! reload through the public session API against a document store that keeps
//! raw JSON.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use serde_json::{json, Value};

    use storefront_designer::design::{DesignDocument, DesignStore, StoreError, StoreId};

    pub(super) fn store_id() -> StoreId {
        StoreId("shibuya-01".to_string())
    }

    /// A document written before the catalog gained several sections, still
    /// carrying retired and renamed ids.
    pub(super) fn stored_legacy_document() -> Value {
        json!({
            "globalSettings": { "mainColor": "#0ea5e9", "maxWidth": "960px" },
            "sections": [
                { "id": "header", "order": 4, "visible": false },
                { "id": "photos", "title": "店内写真", "order": 1, "visible": false },
                { "id": "interview", "title": "スタッフインタビュー", "order": 2 },
                { "id": "salary", "title": "お給料", "order": 3, "settings": { "fontSize": "18px" } }
            ]
        })
    }

    #[derive(Default, Clone)]
    pub(super) struct JsonDocumentStore {
        rows: Arc<Mutex<HashMap<StoreId, Value>>>,
        fail_saves: Arc<Mutex<bool>>,
    }

    impl JsonDocumentStore {
        pub(super) fn with_row(store_id: StoreId, payload: Value) -> Self {
            let store = Self::default();
            store
                .rows
                .lock()
                .expect("rows mutex poisoned")
                .insert(store_id, payload);
            store
        }

        pub(super) fn fail_saves(&self, fail: bool) {
            *self.fail_saves.lock().expect("flag mutex poisoned") = fail;
        }

        pub(super) fn row(&self, store_id: &StoreId) -> Option<Value> {
            self.rows
                .lock()
                .expect("rows mutex poisoned")
                .get(store_id)
                .cloned()
        }
    }

    impl DesignStore for JsonDocumentStore {
        fn load(&self, store_id: &StoreId) -> Result<Option<Value>, StoreError> {
            Ok(self.row(store_id))
        }

        fn save(&self, store_id: &StoreId, document: &DesignDocument) -> Result<(), StoreError> {
            if *self.fail_saves.lock().expect("flag mutex poisoned") {
                return Err(StoreError::Unavailable("network unreachable".to_string()));
            }
            let payload = serde_json::to_value(document)
                .map_err(|err| StoreError::Rejected(err.to_string()))?;
            self.rows
                .lock()
                .expect("rows mutex poisoned")
                .insert(store_id.clone(), payload);
            Ok(())
        }
    }
}

use common::*;
use storefront_designer::design::{
    reconcile, Catalog, DesignDocument, DesignEdit, DesignSession, Direction, SessionError,
    SessionNotice, HEADER_ID,
};

#[test]
fn legacy_document_is_upgraded_on_load_and_persisted_on_save() {
    let store = JsonDocumentStore::with_row(store_id(), stored_legacy_document());
    let mut session = DesignSession::load(store_id(), &store);

    let document = session.document();
    let header = document.header().expect("header present");
    assert_eq!(header.order, 0);
    assert!(header.visible);
    assert!(document.section("interview").is_none());
    assert!(document.section("photos").is_none());

    let gallery = document.section("gallery").expect("alias migrated");
    assert!(!gallery.visible);
    assert_eq!(gallery.title, "店内写真");
    assert_eq!(
        document.section("salary").and_then(|s| s.settings.font_size),
        Some(18)
    );
    for id in Catalog::standard().required_ids() {
        assert!(document.section(id).is_some(), "{id} present");
    }
    assert_eq!(document.global_settings.max_width, 960);

    session
        .apply(DesignEdit::Move {
            section_id: "salary".to_string(),
            direction: Direction::Up,
        })
        .expect("move salary");
    session.save(&store).expect("save");

    let stored = store.row(&store_id()).expect("row written");
    let decoded = DesignDocument::from_value(&stored)
        .expect("stored row decodes")
        .expect("document present");
    assert_eq!(decoded, reconcile(Some(decoded.clone())));
}

#[test]
fn save_then_load_returns_the_reconciled_document() {
    let store = JsonDocumentStore::default();
    let mut session = DesignSession::load(store_id(), &store);
    session
        .apply(DesignEdit::SetVisibility {
            section_id: "access".to_string(),
            visible: false,
        })
        .expect("hide access");
    session.save(&store).expect("save");

    let reloaded = DesignSession::load(store_id(), &store);
    assert_eq!(reloaded.document(), session.document());
    assert!(!reloaded.is_dirty());
}

#[test]
fn save_failures_keep_edits_and_allow_manual_retry() {
    let store = JsonDocumentStore::default();
    let mut session = DesignSession::load(store_id(), &store);
    session
        .apply(DesignEdit::SetVisibility {
            section_id: "blog".to_string(),
            visible: false,
        })
        .expect("hide blog");

    store.fail_saves(true);
    let err = session.save(&store).expect_err("save fails");
    assert!(matches!(err, SessionError::Save(_)));
    assert!(session.is_dirty());
    let notice = session.take_notices().pop().expect("notice recorded");
    assert!(matches!(notice, SessionNotice::SaveFailed { .. }));
    assert!(notice.message().contains("network unreachable"));

    store.fail_saves(false);
    session.save(&store).expect("retry succeeds");
    assert!(!session.is_dirty());
    let stored = store.row(&store_id()).expect("row written");
    let blog = stored["sections"]
        .as_array()
        .expect("sections")
        .iter()
        .find(|section| section["id"] == "blog")
        .cloned()
        .expect("blog stored");
    assert_eq!(blog["visible"], false);
}

#[test]
fn pinned_header_edits_are_refused_without_touching_the_document() {
    let store = JsonDocumentStore::default();
    let mut session = DesignSession::load(store_id(), &store);
    let before = session.document().clone();

    for edit in [
        DesignEdit::SetVisibility {
            section_id: HEADER_ID.to_string(),
            visible: false,
        },
        DesignEdit::Reorder {
            section_id: HEADER_ID.to_string(),
            destination: 4,
        },
    ] {
        assert!(session.apply(edit).is_err());
    }
    assert_eq!(session.document(), &before);
    assert!(!session.is_dirty());
}
