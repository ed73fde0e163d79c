use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::document::DesignDocument;
use super::profile::StoreProfile;
use super::reconcile::reconcile;
use super::render::{render, ContentBlock};
use super::session::{DesignSession, SessionNotice};
use super::store::{DesignStore, ProfileSource, StoreError, StoreId};

/// Service composing the design store, the profile source and the engine.
pub struct DesignService<S, P> {
    store: Arc<S>,
    profiles: Arc<P>,
}

/// Reconciled document plus anything the editor should tell the user about it.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedDesign {
    pub document: DesignDocument,
    pub notices: Vec<SessionNotice>,
}

impl<S, P> DesignService<S, P>
where
    S: DesignStore + 'static,
    P: ProfileSource + 'static,
{
    pub fn new(store: Arc<S>, profiles: Arc<P>) -> Self {
        Self { store, profiles }
    }

    /// Loads the stored design, falling back to defaults on any failure.
    pub fn load(&self, store_id: &StoreId) -> LoadedDesign {
        let mut session = DesignSession::load(store_id.clone(), self.store.as_ref());
        let notices = session.take_notices();
        LoadedDesign {
            document: session.document().clone(),
            notices,
        }
    }

    /// Reconciles and persists the full document, returning what was stored.
    pub fn save(
        &self,
        store_id: &StoreId,
        document: DesignDocument,
    ) -> Result<DesignDocument, DesignServiceError> {
        let reconciled = reconcile(Some(document));
        self.store.save(store_id, &reconciled)?;
        Ok(reconciled)
    }

    /// Fetches and coerces the store profile. An unavailable profile renders as
    /// an empty one.
    pub fn profile(&self, store_id: &StoreId) -> StoreProfile {
        match self.profiles.profile(store_id) {
            Ok(Some(raw)) => StoreProfile::from_value(&raw),
            Ok(None) => StoreProfile::default(),
            Err(err) => {
                warn!(%store_id, error = %err, "profile unavailable; rendering without it");
                StoreProfile::default()
            }
        }
    }

    /// Renders an unsaved working document.
    pub fn preview(&self, store_id: &StoreId, document: &DesignDocument) -> Vec<ContentBlock> {
        render(document, &self.profile(store_id))
    }

    /// Renders whatever is currently stored.
    pub fn preview_stored(&self, store_id: &StoreId) -> Vec<ContentBlock> {
        let loaded = self.load(store_id);
        self.preview(store_id, &loaded.document)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DesignServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
