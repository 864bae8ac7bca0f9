use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// NutriLife API domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("profile not found")]
    ProfileNotFound,
    #[error("preference not found")]
    PreferenceNotFound,
    #[error("meal not found")]
    MealNotFound,
    #[error("post not found")]
    PostNotFound,
    #[error("user already has a profile")]
    ProfileAlreadyExists,
    #[error("missing data")]
    MissingData,
    #[error("invalid role")]
    InvalidRole,
    #[error("invalid calories")]
    InvalidCalories,
    #[error("invalid datetime")]
    InvalidDatetime,
    #[error("invalid category id")]
    InvalidCategoryId,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::PreferenceNotFound => "PREFERENCE_NOT_FOUND",
            Self::MealNotFound => "MEAL_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::ProfileAlreadyExists => "PROFILE_ALREADY_EXISTS",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidCalories => "INVALID_CALORIES",
            Self::InvalidDatetime => "INVALID_DATETIME",
            Self::InvalidCategoryId => "INVALID_CATEGORY_ID",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::ProfileNotFound
            | Self::PreferenceNotFound
            | Self::MealNotFound
            | Self::PostNotFound => StatusCode::NOT_FOUND,
            Self::ProfileAlreadyExists => StatusCode::CONFLICT,
            Self::MissingData
            | Self::InvalidRole
            | Self::InvalidCalories
            | Self::InvalidDatetime
            | Self::InvalidCategoryId => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — the request trace layer already records method/uri/status
        // for all requests. 4xx are expected client errors; logging them here would
        // be noise. Internal errors need the anyhow chain logged so the root cause
        // is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
