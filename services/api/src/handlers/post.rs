use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::Post;
use crate::error::ApiServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::upload::UploadForm;
use crate::usecase::post::{
    CreatePostInput, CreatePostUseCase, DeletePostUseCase, GetPostUseCase, ListPostsUseCase,
    UpdatePostInput, UpdatePostUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Only present on single-post reads and updates; listings return the
    /// bare post rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(serialize_with = "nutrilife_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "nutrilife_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl PostResponse {
    fn from_post(post: Post, categories: Option<Vec<Uuid>>) -> Self {
        Self {
            id: post.id.to_string(),
            user_id: post.user_id.to_string(),
            title: post.title,
            description: post.description,
            published: post.published,
            image: post.image,
            categories: categories
                .map(|ids| ids.into_iter().map(|id| id.to_string()).collect()),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ── POST /posts ──────────────────────────────────────────────────────────────

pub async fn create_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PostResponse>), ApiServiceError> {
    let form = UploadForm::collect(multipart).await?;
    let usecase = CreatePostUseCase {
        repo: state.post_repo(),
        store: state.attachment_store(),
    };
    let post = usecase
        .execute(CreatePostInput {
            user_id: form.text("userId"),
            title: form.text("title"),
            description: form.text("description"),
            image: form.image,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PostResponse::from_post(post, None)),
    ))
}

// ── GET /posts ───────────────────────────────────────────────────────────────

pub async fn get_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, ApiServiceError> {
    let usecase = ListPostsUseCase {
        repo: state.post_repo(),
    };
    let posts = usecase.execute().await?;
    let items = posts
        .into_iter()
        .map(|post| PostResponse::from_post(post, None))
        .collect();
    Ok(Json(items))
}

// ── GET /posts/{post_id} ─────────────────────────────────────────────────────

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiServiceError> {
    let usecase = GetPostUseCase {
        repo: state.post_repo(),
    };
    let (post, categories) = usecase.execute(post_id).await?;
    Ok(Json(PostResponse::from_post(post, Some(categories))))
}

// ── PUT /posts/{post_id} ─────────────────────────────────────────────────────

pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<PostResponse>, ApiServiceError> {
    let form = UploadForm::collect(multipart).await?;
    let usecase = UpdatePostUseCase {
        repo: state.post_repo(),
        store: state.attachment_store(),
    };
    let (post, categories) = usecase
        .execute(
            post_id,
            UpdatePostInput {
                title: form.text("title"),
                description: form.text("description"),
                published: form.text("published"),
                categories: form.categories,
                image: form.image,
            },
        )
        .await?;
    Ok(Json(PostResponse::from_post(post, Some(categories))))
}

// ── DELETE /posts/{post_id} ──────────────────────────────────────────────────

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiServiceError> {
    let usecase = DeletePostUseCase {
        repo: state.post_repo(),
        store: state.attachment_store(),
    };
    usecase.execute(post_id).await?;
    Ok(Json(MessageResponse {
        message: "post deleted",
    }))
}
