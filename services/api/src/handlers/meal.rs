use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::domain::types::Meal;
use crate::error::ApiServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::upload::UploadForm;
use crate::usecase::meal::{
    CreateMealInput, CreateMealUseCase, DeleteMealUseCase, GetMealUseCase, ListMealsUseCase,
    UpdateMealInput, UpdateMealUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealResponse {
    pub id: i32,
    pub user_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub calories: Option<i32>,
    #[serde(serialize_with = "nutrilife_core::serde::to_rfc3339_ms")]
    pub datetime: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(serialize_with = "nutrilife_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "nutrilife_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Meal> for MealResponse {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id,
            user_id: meal.user_id.to_string(),
            title: meal.title,
            description: meal.description,
            calories: meal.calories,
            datetime: meal.datetime,
            image: meal.image,
            created_at: meal.created_at,
            updated_at: meal.updated_at,
        }
    }
}

// ── POST /meals ──────────────────────────────────────────────────────────────

pub async fn create_meal(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<MealResponse>), ApiServiceError> {
    let form = UploadForm::collect(multipart).await?;
    let usecase = CreateMealUseCase {
        repo: state.meal_repo(),
        store: state.attachment_store(),
    };
    let meal = usecase
        .execute(CreateMealInput {
            user_id: form.text("userId"),
            title: form.text("title"),
            description: form.text("description"),
            calories: form.text("calories"),
            datetime: form.text("datetime"),
            image: form.image,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(meal.into())))
}

// ── GET /meals ───────────────────────────────────────────────────────────────

pub async fn get_meals(
    State(state): State<AppState>,
) -> Result<Json<Vec<MealResponse>>, ApiServiceError> {
    let usecase = ListMealsUseCase {
        repo: state.meal_repo(),
    };
    let meals = usecase.execute().await?;
    Ok(Json(meals.into_iter().map(Into::into).collect()))
}

// ── GET /meals/{meal_id} ─────────────────────────────────────────────────────

pub async fn get_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<i32>,
) -> Result<Json<MealResponse>, ApiServiceError> {
    let usecase = GetMealUseCase {
        repo: state.meal_repo(),
    };
    let meal = usecase.execute(meal_id).await?;
    Ok(Json(meal.into()))
}

// ── PUT /meals/{meal_id} ─────────────────────────────────────────────────────

pub async fn update_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<MealResponse>, ApiServiceError> {
    let form = UploadForm::collect(multipart).await?;
    let usecase = UpdateMealUseCase {
        repo: state.meal_repo(),
        store: state.attachment_store(),
    };
    let meal = usecase
        .execute(
            meal_id,
            UpdateMealInput {
                title: form.text("title"),
                description: form.text("description"),
                calories: form.text("calories"),
                datetime: form.text("datetime"),
                image: form.image,
            },
        )
        .await?;
    Ok(Json(meal.into()))
}

// ── DELETE /meals/{meal_id} ──────────────────────────────────────────────────

pub async fn delete_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiServiceError> {
    let usecase = DeleteMealUseCase {
        repo: state.meal_repo(),
        store: state.attachment_store(),
    };
    usecase.execute(meal_id).await?;
    Ok(Json(MessageResponse {
        message: "meal deleted",
    }))
}
