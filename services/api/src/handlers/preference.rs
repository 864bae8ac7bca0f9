use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Preference;
use crate::error::ApiServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::preference::{
    CreatePreferenceInput, CreatePreferenceUseCase, DeletePreferenceUseCase,
    GetUserPreferencesUseCase, ListPreferencesUseCase, UpdatePreferenceUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceResponse {
    pub id: i32,
    pub user_id: String,
    pub key: String,
    pub value: String,
    #[serde(serialize_with = "nutrilife_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Preference> for PreferenceResponse {
    fn from(preference: Preference) -> Self {
        Self {
            id: preference.id,
            user_id: preference.user_id.to_string(),
            key: preference.key,
            value: preference.value,
            created_at: preference.created_at,
        }
    }
}

// ── POST /preferences ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreferenceRequest {
    pub user_id: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
}

pub async fn create_preference(
    State(state): State<AppState>,
    Json(body): Json<CreatePreferenceRequest>,
) -> Result<(StatusCode, Json<PreferenceResponse>), ApiServiceError> {
    let usecase = CreatePreferenceUseCase {
        repo: state.preference_repo(),
    };
    let preference = usecase
        .execute(CreatePreferenceInput {
            user_id: body.user_id,
            key: body.key,
            value: body.value,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(preference.into())))
}

// ── GET /preferences ─────────────────────────────────────────────────────────

pub async fn get_preferences(
    State(state): State<AppState>,
) -> Result<Json<Vec<PreferenceResponse>>, ApiServiceError> {
    let usecase = ListPreferencesUseCase {
        repo: state.preference_repo(),
    };
    let preferences = usecase.execute().await?;
    Ok(Json(preferences.into_iter().map(Into::into).collect()))
}

// ── GET /preferences/{user_id} ───────────────────────────────────────────────

pub async fn get_user_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PreferenceResponse>>, ApiServiceError> {
    let usecase = GetUserPreferencesUseCase {
        repo: state.preference_repo(),
    };
    let preferences = usecase.execute(user_id).await?;
    Ok(Json(preferences.into_iter().map(Into::into).collect()))
}

// ── PUT /preferences/{preference_id} ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePreferenceRequest {
    pub key: Option<String>,
    pub value: Option<String>,
}

pub async fn update_preference(
    State(state): State<AppState>,
    Path(preference_id): Path<i32>,
    Json(body): Json<UpdatePreferenceRequest>,
) -> Result<Json<PreferenceResponse>, ApiServiceError> {
    let usecase = UpdatePreferenceUseCase {
        repo: state.preference_repo(),
    };
    let preference = usecase
        .execute(preference_id, body.key, body.value)
        .await?;
    Ok(Json(preference.into()))
}

// ── DELETE /preferences/{preference_id} ──────────────────────────────────────

pub async fn delete_preference(
    State(state): State<AppState>,
    Path(preference_id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiServiceError> {
    let usecase = DeletePreferenceUseCase {
        repo: state.preference_repo(),
    };
    usecase.execute(preference_id).await?;
    Ok(Json(MessageResponse {
        message: "preference deleted",
    }))
}
