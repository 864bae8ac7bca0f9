use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AttachmentStore, PostRepository};
use crate::domain::types::{AttachmentKind, Post, PostChanges, StagedUpload};
use crate::error::ApiServiceError;
use crate::usecase::require_user_id;

fn parse_published(raw: Option<&str>) -> Result<Option<bool>, ApiServiceError> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    s.parse().map(Some).map_err(|_| ApiServiceError::MissingData)
}

fn parse_category_ids(raw: Option<Vec<String>>) -> Result<Option<Vec<Uuid>>, ApiServiceError> {
    let Some(values) = raw else {
        return Ok(None);
    };
    let mut ids = Vec::with_capacity(values.len());
    for value in values {
        let id =
            Uuid::parse_str(value.trim()).map_err(|_| ApiServiceError::InvalidCategoryId)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(Some(ids))
}

// ── CreatePost ───────────────────────────────────────────────────────────────

pub struct CreatePostInput {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<StagedUpload>,
}

pub struct CreatePostUseCase<R: PostRepository, S: AttachmentStore> {
    pub repo: R,
    pub store: S,
}

impl<R: PostRepository, S: AttachmentStore> CreatePostUseCase<R, S> {
    /// New posts always start unpublished.
    pub async fn execute(&self, input: CreatePostInput) -> Result<Post, ApiServiceError> {
        let user_id = require_user_id(input.user_id.as_deref())?;
        let image = match &input.image {
            Some(upload) => Some(
                self.store
                    .store(AttachmentKind::Posts, input.title.as_deref(), upload)
                    .await?,
            ),
            None => None,
        };
        let now = Utc::now();
        let post = Post {
            id: Uuid::now_v7(),
            user_id,
            title: input.title,
            description: input.description,
            published: false,
            image: image.clone(),
            created_at: now,
            updated_at: now,
        };
        match self.repo.create(&post).await {
            Ok(()) => Ok(post),
            Err(e) => {
                // The row never landed; reclaim the file staged for it.
                if let Some(path) = image {
                    if let Err(cleanup) = self.store.delete(&path).await {
                        tracing::warn!(error = %cleanup, path = %path, "failed to remove staged attachment");
                    }
                }
                Err(e)
            }
        }
    }
}

// ── ListPosts ────────────────────────────────────────────────────────────────

pub struct ListPostsUseCase<R: PostRepository> {
    pub repo: R,
}

impl<R: PostRepository> ListPostsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Post>, ApiServiceError> {
        self.repo.list_all().await
    }
}

// ── GetPost ──────────────────────────────────────────────────────────────────

pub struct GetPostUseCase<R: PostRepository> {
    pub repo: R,
}

impl<R: PostRepository> GetPostUseCase<R> {
    pub async fn execute(&self, post_id: Uuid) -> Result<(Post, Vec<Uuid>), ApiServiceError> {
        self.repo
            .find_by_id(post_id)
            .await?
            .ok_or(ApiServiceError::PostNotFound)
    }
}

// ── UpdatePost ───────────────────────────────────────────────────────────────

pub struct UpdatePostInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>,
    pub categories: Option<Vec<String>>,
    pub image: Option<StagedUpload>,
}

pub struct UpdatePostUseCase<R: PostRepository, S: AttachmentStore> {
    pub repo: R,
    pub store: S,
}

impl<R: PostRepository, S: AttachmentStore> UpdatePostUseCase<R, S> {
    pub async fn execute(
        &self,
        post_id: Uuid,
        input: UpdatePostInput,
    ) -> Result<(Post, Vec<Uuid>), ApiServiceError> {
        let (existing, _) = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(ApiServiceError::PostNotFound)?;
        let published = parse_published(input.published.as_deref())?;
        let categories = parse_category_ids(input.categories)?;
        let image = match &input.image {
            Some(upload) => {
                let title = input.title.as_deref().or(existing.title.as_deref());
                let new_path = self
                    .store
                    .store(AttachmentKind::Posts, title, upload)
                    .await?;
                // At most one live file per post: the replaced file goes away
                // before the record points at the new one.
                if let Some(old) = &existing.image {
                    if let Err(e) = self.store.delete(old).await {
                        tracing::warn!(error = %e, path = %old, "failed to remove replaced attachment");
                    }
                }
                Some(new_path)
            }
            None => None,
        };
        let changes = PostChanges {
            title: input.title,
            description: input.description,
            published,
            image,
            categories,
        };
        self.repo
            .update(post_id, &changes)
            .await?
            .ok_or(ApiServiceError::PostNotFound)
    }
}

// ── DeletePost ───────────────────────────────────────────────────────────────

pub struct DeletePostUseCase<R: PostRepository, S: AttachmentStore> {
    pub repo: R,
    pub store: S,
}

impl<R: PostRepository, S: AttachmentStore> DeletePostUseCase<R, S> {
    pub async fn execute(&self, post_id: Uuid) -> Result<(), ApiServiceError> {
        let (post, _) = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(ApiServiceError::PostNotFound)?;
        if let Some(image) = &post.image {
            if let Err(e) = self.store.delete(image).await {
                tracing::warn!(error = %e, path = %image, "failed to remove attachment of deleted post");
            }
        }
        let deleted = self.repo.delete(post_id).await?;
        if !deleted {
            return Err(ApiServiceError::PostNotFound);
        }
        Ok(())
    }
}
