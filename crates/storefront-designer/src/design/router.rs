use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::document::DesignDocument;
use super::reconcile::reconcile;
use super::render::ContentBlock;
use super::service::{DesignService, DesignServiceError};
use super::store::{DesignStore, ProfileSource, StoreError, StoreId};

#[derive(Debug, Serialize)]
pub(crate) struct PreviewResponse {
    pub(crate) store_id: StoreId,
    pub(crate) blocks: Vec<ContentBlock>,
}

/// Router builder exposing the design document and preview endpoints.
pub fn design_router<S, P>(service: Arc<DesignService<S, P>>) -> Router
where
    S: DesignStore + 'static,
    P: ProfileSource + 'static,
{
    Router::new()
        .route(
            "/api/v1/stores/:store_id/design",
            get(load_handler::<S, P>).put(save_handler::<S, P>),
        )
        .route(
            "/api/v1/stores/:store_id/preview",
            get(stored_preview_handler::<S, P>).post(preview_handler::<S, P>),
        )
        .with_state(service)
}

pub(crate) async fn load_handler<S, P>(
    State(service): State<Arc<DesignService<S, P>>>,
    Path(store_id): Path<String>,
) -> Response
where
    S: DesignStore + 'static,
    P: ProfileSource + 'static,
{
    let loaded = service.load(&StoreId(store_id));
    (StatusCode::OK, axum::Json(loaded)).into_response()
}

pub(crate) async fn save_handler<S, P>(
    State(service): State<Arc<DesignService<S, P>>>,
    Path(store_id): Path<String>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    S: DesignStore + 'static,
    P: ProfileSource + 'static,
{
    let document = match DesignDocument::from_value(&payload) {
        Ok(document) => document.unwrap_or_default(),
        Err(error) => return unprocessable(error.to_string()),
    };

    match service.save(&StoreId(store_id), document) {
        Ok(saved) => (StatusCode::OK, axum::Json(saved)).into_response(),
        Err(DesignServiceError::Store(StoreError::Rejected(reason))) => unprocessable(reason),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn stored_preview_handler<S, P>(
    State(service): State<Arc<DesignService<S, P>>>,
    Path(store_id): Path<String>,
) -> Response
where
    S: DesignStore + 'static,
    P: ProfileSource + 'static,
{
    let store_id = StoreId(store_id);
    let blocks = service.preview_stored(&store_id);
    (StatusCode::OK, axum::Json(PreviewResponse { store_id, blocks })).into_response()
}

pub(crate) async fn preview_handler<S, P>(
    State(service): State<Arc<DesignService<S, P>>>,
    Path(store_id): Path<String>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    S: DesignStore + 'static,
    P: ProfileSource + 'static,
{
    // Reconciled exactly as a save would be.
    let document = match DesignDocument::from_value(&payload) {
        Ok(document) => reconcile(document),
        Err(error) => return unprocessable(error.to_string()),
    };

    let store_id = StoreId(store_id);
    let blocks = service.preview(&store_id, &document);
    (StatusCode::OK, axum::Json(PreviewResponse { store_id, blocks })).into_response()
}

fn unprocessable(reason: String) -> Response {
    let payload = json!({
        "error": reason,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
