use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AttachmentStore, UserRepository};
use crate::domain::types::{Profile, User, UserRole};
use crate::error::ApiServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, ApiServiceError> {
        let (Some(name), Some(email), Some(role)) = (input.name, input.email, input.role) else {
            return Err(ApiServiceError::MissingData);
        };
        let role = UserRole::parse(&role).ok_or(ApiServiceError::InvalidRole)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name,
            email,
            role,
            created_at: now,
            updated_at: now,
        };
        // A supplied bio creates the profile in the same unit of work as the
        // user row.
        let profile = input.bio.map(|bio| Profile {
            id: Uuid::now_v7(),
            user_id: user.id,
            bio,
            created_at: now,
            updated_at: now,
        });
        self.repo.create(&user, profile.as_ref()).await?;
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, ApiServiceError> {
        self.repo.list_all().await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
    ) -> Result<(User, Option<Profile>), ApiServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository, S: AttachmentStore> {
    pub repo: R,
    pub store: S,
}

impl<R: UserRepository, S: AttachmentStore> DeleteUserUseCase<R, S> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), ApiServiceError> {
        let image_paths = self
            .repo
            .delete_cascade(user_id)
            .await?
            .ok_or(ApiServiceError::UserNotFound)?;
        // File cleanup runs after the cascade committed and never rolls it
        // back.
        for path in image_paths {
            if let Err(e) = self.store.delete(&path).await {
                tracing::warn!(error = %e, path = %path, "failed to remove attachment of deleted user");
            }
        }
        Ok(())
    }
}
