use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiMultipart, ApiQuery};
use crate::core::registry::RegistrationService;
use crate::domain::model::{Department, Institute, NewInstitute};
use crate::domain::ports::{BlobStore, RecordStore};
use crate::utils::error::RegistryError;

#[derive(Deserialize)]
pub struct DepartmentsQuery {
    pub institute_id: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
}

/// `POST /register` — create an institute, echoing the stored record.
pub async fn register<R: RecordStore, B: BlobStore>(
    State(service): State<Arc<RegistrationService<R, B>>>,
    ApiJson(payload): ApiJson<NewInstitute>,
) -> Result<Json<Institute>, ApiError> {
    let institute = service.create_institute(&payload).await?;
    Ok(Json(institute))
}

/// `GET /institutes` — all institutes, store order, no pagination.
pub async fn list_institutes<R: RecordStore, B: BlobStore>(
    State(service): State<Arc<RegistrationService<R, B>>>,
) -> Result<Json<Vec<Institute>>, ApiError> {
    let institutes = service.list_institutes().await?;
    Ok(Json(institutes))
}

/// `GET /departments?institute_id=X` — departments of one institute.
pub async fn list_departments<R: RecordStore, B: BlobStore>(
    State(service): State<Arc<RegistrationService<R, B>>>,
    ApiQuery(query): ApiQuery<DepartmentsQuery>,
) -> Result<Json<Vec<Department>>, ApiError> {
    let departments = service.list_departments(&query.institute_id).await?;
    Ok(Json(departments))
}

/// `POST /upload/:institute_id` — multipart CSV upload, ingested as
/// department rows for the institute in the path.
///
/// The `file` part must carry a filename: the raw bytes are stored under
/// that original name, so a nameless part is rejected rather than invented.
pub async fn upload<R: RecordStore, B: BlobStore>(
    State(service): State<Arc<RegistrationService<R, B>>>,
    Path(institute_id): Path<String>,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().map(str::to_string).ok_or_else(|| {
                RegistryError::validation("multipart 'file' part must carry a filename")
            })?;
            let bytes = field.bytes().await?;
            file = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, data) = file.ok_or_else(|| {
        RegistryError::validation("multipart field 'file' is required")
    })?;

    service
        .ingest_departments(&institute_id, &data, &filename)
        .await?;

    Ok(Json(UploadResponse { message: "ok" }))
}
