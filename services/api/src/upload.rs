use std::collections::HashMap;

use axum::extract::Multipart;

use crate::domain::types::StagedUpload;
use crate::error::ApiServiceError;

/// Text fields plus the staged `image` part (at most one) of a multipart
/// request body.
pub struct UploadForm {
    fields: HashMap<String, String>,
    pub categories: Option<Vec<String>>,
    pub image: Option<StagedUpload>,
}

impl UploadForm {
    /// Drain a multipart body. Decode failures map to `MissingData`.
    pub async fn collect(mut multipart: Multipart) -> Result<Self, ApiServiceError> {
        let mut fields = HashMap::new();
        let mut categories = None;
        let mut image = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| ApiServiceError::MissingData)?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            match name.as_str() {
                "image" => {
                    let original_filename = field.file_name().unwrap_or("image").to_owned();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|_| ApiServiceError::MissingData)?;
                    image = Some(StagedUpload {
                        original_filename,
                        data,
                    });
                }
                // Repeated field carrying the full category id set.
                "categories" => {
                    let value = field
                        .text()
                        .await
                        .map_err(|_| ApiServiceError::MissingData)?;
                    categories.get_or_insert_with(Vec::new).push(value);
                }
                _ => {
                    let value = field
                        .text()
                        .await
                        .map_err(|_| ApiServiceError::MissingData)?;
                    fields.insert(name, value);
                }
            }
        }
        Ok(Self {
            fields,
            categories,
            image,
        })
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }
}
