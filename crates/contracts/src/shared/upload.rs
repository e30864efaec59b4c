use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Имя поля multipart формы с файлом
pub const UPLOAD_FILE_FIELD: &str = "file";

/// Результат загрузки файла (POST uploads)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
    /// Прочие текстовые поля формы
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    pub uploaded_at: DateTime<Utc>,
}
