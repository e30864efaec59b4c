use std::collections::BTreeMap;

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::Json;
use chrono::Utc;
use contracts::shared::upload::UPLOAD_FILE_FIELD;
use contracts::shared::{ApiResponse, UploadedFile};

use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;

/// POST /api/uploads
///
/// multipart: поле `file` + произвольные текстовые поля. Mock: содержимое
/// не сохраняется, в ответе только метаданные.
pub async fn upload(
    CurrentUser(claims): CurrentUser,
    payload: Result<Multipart, MultipartRejection>,
) -> AppResult<UploadedFile> {
    let mut multipart = payload?;
    let mut file = None;
    let mut fields = BTreeMap::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == UPLOAD_FILE_FIELD {
            let file_name = field.file_name().unwrap_or("upload.bin").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?;
            file = Some((file_name, content_type, bytes.len() as u64));
        } else {
            fields.insert(name, field.text().await?);
        }
    }

    let (file_name, content_type, size) = file.ok_or_else(|| {
        AppError::bad_request(format!("Multipart field '{}' is required", UPLOAD_FILE_FIELD))
    })?;

    tracing::info!(
        "{} uploaded {} ({}, {} bytes)",
        claims.username,
        file_name,
        content_type,
        size
    );
    let uploaded = UploadedFile {
        id: uuid::Uuid::new_v4().to_string(),
        file_name,
        content_type,
        size,
        fields,
        uploaded_at: Utc::now(),
    };
    Ok(Json(ApiResponse::ok("File uploaded successfully", uploaded)))
}
