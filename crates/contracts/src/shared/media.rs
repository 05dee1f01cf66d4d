use serde::{Deserialize, Serialize};

/// Ответ эндпоинта загрузки файла, он же ссылка на изображение в записи
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub id: i64,
    pub url: String,
}
