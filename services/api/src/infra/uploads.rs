use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use tokio::fs;

use crate::domain::repository::AttachmentStore;
use crate::domain::types::{AttachmentKind, StagedUpload};
use crate::error::ApiServiceError;

/// Filesystem-backed attachment store. Files live in one directory per
/// entity kind under the uploads root and are addressed by paths relative
/// to that root.
#[derive(Clone)]
pub struct FsAttachmentStore {
    base: PathBuf,
}

impl FsAttachmentStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Create the per-kind directories. Call once at startup.
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        for kind in [AttachmentKind::Meals, AttachmentKind::Posts] {
            fs::create_dir_all(self.base.join(kind.dir()))
                .await
                .with_context(|| format!("create uploads dir {}", kind.dir()))?;
        }
        Ok(())
    }
}

/// Replace every non-alphanumeric character so the title is safe as a file
/// name component.
fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// The upload's extension, dot included, or empty when it has none.
fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

impl AttachmentStore for FsAttachmentStore {
    async fn store(
        &self,
        kind: AttachmentKind,
        title: Option<&str>,
        upload: &StagedUpload,
    ) -> Result<String, ApiServiceError> {
        let title = title.filter(|t| !t.trim().is_empty()).unwrap_or("untitled");
        let name = format!(
            "{}-{}{}",
            sanitize_title(title),
            Utc::now().timestamp_millis(),
            extension_of(&upload.original_filename),
        );
        let relative = format!("{}/{}", kind.dir(), name);
        fs::write(self.base.join(&relative), &upload.data)
            .await
            .with_context(|| format!("write attachment {relative}"))?;
        Ok(relative)
    }

    async fn delete(&self, path: &str) -> Result<bool, ApiServiceError> {
        match fs::remove_file(self.base.join(path)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("delete attachment {path}"))
                .into()),
        }
    }
}
