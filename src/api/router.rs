//! Registration gateway router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! All handlers are generic over the injected store capabilities so tests
//! can run against in-memory collaborators.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::core::registry::RegistrationService;
use crate::domain::ports::{BlobStore, RecordStore};

/// CSV uploads are read fully into memory; cap them well above any realistic
/// department list.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn registry_router<R, B>(service: Arc<RegistrationService<R, B>>) -> Router
where
    R: RecordStore + 'static,
    B: BlobStore + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R, B>))
        .route("/institutes", get(handlers::list_institutes::<R, B>))
        .route("/departments", get(handlers::list_departments::<R, B>))
        .route("/upload/:institute_id", post(handlers::upload::<R, B>))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(service)
}
