use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::Profile;
use crate::error::ApiServiceError;

// ── CreateProfile ────────────────────────────────────────────────────────────

pub struct CreateProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> CreateProfileUseCase<R> {
    /// No existence pre-check: the unique constraint on the profile's user
    /// reference decides, and the repository translates a violation to
    /// `ProfileAlreadyExists`.
    pub async fn execute(
        &self,
        user_id: Uuid,
        bio: Option<String>,
    ) -> Result<Profile, ApiServiceError> {
        let bio = bio.ok_or(ApiServiceError::MissingData)?;
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::now_v7(),
            user_id,
            bio,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&profile).await?;
        Ok(profile)
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Profile, ApiServiceError> {
        self.repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(ApiServiceError::ProfileNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        bio: Option<String>,
    ) -> Result<Profile, ApiServiceError> {
        let bio = bio.ok_or(ApiServiceError::MissingData)?;
        self.repo
            .update_bio(user_id, &bio)
            .await?
            .ok_or(ApiServiceError::ProfileNotFound)
    }
}

// ── DeleteProfile ────────────────────────────────────────────────────────────

pub struct DeleteProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> DeleteProfileUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), ApiServiceError> {
        let deleted = self.repo.delete_by_user_id(user_id).await?;
        if !deleted {
            return Err(ApiServiceError::ProfileNotFound);
        }
        Ok(())
    }
}
