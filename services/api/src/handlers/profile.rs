use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Profile;
use crate::error::ApiServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::profile::{
    CreateProfileUseCase, DeleteProfileUseCase, GetProfileUseCase, UpdateProfileUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub user_id: String,
    pub bio: String,
    #[serde(serialize_with = "nutrilife_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "nutrilife_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            user_id: profile.user_id.to_string(),
            bio: profile.bio,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct ProfileBody {
    pub bio: Option<String>,
}

// ── POST /profile/{user_id} ──────────────────────────────────────────────────

pub async fn create_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ProfileBody>,
) -> Result<(StatusCode, Json<ProfileResponse>), ApiServiceError> {
    let usecase = CreateProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(user_id, body.bio).await?;
    Ok((StatusCode::CREATED, Json(profile.into())))
}

// ── GET /profile/{user_id} ───────────────────────────────────────────────────

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiServiceError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(user_id).await?;
    Ok(Json(profile.into()))
}

// ── PUT /profile/{user_id} ───────────────────────────────────────────────────

pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ProfileBody>,
) -> Result<Json<ProfileResponse>, ApiServiceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(user_id, body.bio).await?;
    Ok(Json(profile.into()))
}

// ── DELETE /profile/{user_id} ────────────────────────────────────────────────

pub async fn delete_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiServiceError> {
    let usecase = DeleteProfileUseCase {
        repo: state.profile_repo(),
    };
    usecase.execute(user_id).await?;
    Ok(Json(MessageResponse {
        message: "profile deleted",
    }))
}
