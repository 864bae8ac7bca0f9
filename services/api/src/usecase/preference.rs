use uuid::Uuid;

use crate::domain::repository::PreferenceRepository;
use crate::domain::types::{NewPreference, Preference};
use crate::error::ApiServiceError;
use crate::usecase::require_user_id;

// ── CreatePreference ─────────────────────────────────────────────────────────

pub struct CreatePreferenceInput {
    pub user_id: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
}

pub struct CreatePreferenceUseCase<R: PreferenceRepository> {
    pub repo: R,
}

impl<R: PreferenceRepository> CreatePreferenceUseCase<R> {
    pub async fn execute(
        &self,
        input: CreatePreferenceInput,
    ) -> Result<Preference, ApiServiceError> {
        let user_id = require_user_id(input.user_id.as_deref())?;
        let (Some(key), Some(value)) = (input.key, input.value) else {
            return Err(ApiServiceError::MissingData);
        };
        self.repo
            .create(&NewPreference {
                user_id,
                key,
                value,
            })
            .await
    }
}

// ── ListPreferences ──────────────────────────────────────────────────────────

pub struct ListPreferencesUseCase<R: PreferenceRepository> {
    pub repo: R,
}

impl<R: PreferenceRepository> ListPreferencesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Preference>, ApiServiceError> {
        self.repo.list_all().await
    }
}

// ── GetUserPreferences ───────────────────────────────────────────────────────

pub struct GetUserPreferencesUseCase<R: PreferenceRepository> {
    pub repo: R,
}

impl<R: PreferenceRepository> GetUserPreferencesUseCase<R> {
    /// Listing for an unknown user is an empty list, not an error.
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Preference>, ApiServiceError> {
        self.repo.list_by_user_id(user_id).await
    }
}

// ── UpdatePreference ─────────────────────────────────────────────────────────

pub struct UpdatePreferenceUseCase<R: PreferenceRepository> {
    pub repo: R,
}

impl<R: PreferenceRepository> UpdatePreferenceUseCase<R> {
    pub async fn execute(
        &self,
        preference_id: i32,
        key: Option<String>,
        value: Option<String>,
    ) -> Result<Preference, ApiServiceError> {
        if key.is_none() && value.is_none() {
            return Err(ApiServiceError::MissingData);
        }
        self.repo
            .update(preference_id, key.as_deref(), value.as_deref())
            .await?
            .ok_or(ApiServiceError::PreferenceNotFound)
    }
}

// ── DeletePreference ─────────────────────────────────────────────────────────

pub struct DeletePreferenceUseCase<R: PreferenceRepository> {
    pub repo: R,
}

impl<R: PreferenceRepository> DeletePreferenceUseCase<R> {
    pub async fn execute(&self, preference_id: i32) -> Result<(), ApiServiceError> {
        let deleted = self.repo.delete(preference_id).await?;
        if !deleted {
            return Err(ApiServiceError::PreferenceNotFound);
        }
        Ok(())
    }
}
