use contracts::shared::UploadedFile;
use contracts::system::auth::ApiError;
use web_sys::File;

use super::ApiClient;

/// POST uploads (multipart)
pub async fn upload_file(
    client: &ApiClient,
    file: &File,
    fields: &[(&str, &str)],
) -> Result<UploadedFile, ApiError> {
    client.upload("uploads", file, fields).await
}
