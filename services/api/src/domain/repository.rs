#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    AttachmentKind, Meal, MealChanges, NewMeal, NewPreference, Post, PostChanges, Preference,
    Profile, StagedUpload, User,
};
use crate::error::ApiServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    /// Insert the user and, when given, its profile in one atomic unit.
    async fn create(&self, user: &User, profile: Option<&Profile>) -> Result<(), ApiServiceError>;

    /// All users in insertion order. Listing is unpaginated.
    async fn list_all(&self) -> Result<Vec<User>, ApiServiceError>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(User, Option<Profile>)>, ApiServiceError>;

    /// Delete the user and every dependent row (posts, profile, preferences,
    /// meals) in one transaction. Returns the attachment paths referenced by
    /// the deleted meals and posts, or `None` when no such user exists.
    async fn delete_cascade(&self, id: Uuid) -> Result<Option<Vec<String>>, ApiServiceError>;
}

/// Repository for biography profiles.
pub trait ProfileRepository: Send + Sync {
    /// Insert a profile. The storage-level unique constraint on `user_id` is
    /// the source of truth for the one-profile-per-user invariant; a
    /// violation surfaces as `ProfileAlreadyExists` and an unknown user as
    /// `UserNotFound`.
    async fn create(&self, profile: &Profile) -> Result<(), ApiServiceError>;

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, ApiServiceError>;

    /// Replace the bio. Returns the updated profile, `None` when the user
    /// has no profile.
    async fn update_bio(
        &self,
        user_id: Uuid,
        bio: &str,
    ) -> Result<Option<Profile>, ApiServiceError>;

    /// Delete a profile. Returns `true` if a row was deleted.
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, ApiServiceError>;
}

/// Repository for key/value preferences.
pub trait PreferenceRepository: Send + Sync {
    /// Insert a preference. An unknown user surfaces as `UserNotFound`.
    async fn create(&self, preference: &NewPreference) -> Result<Preference, ApiServiceError>;

    async fn list_all(&self) -> Result<Vec<Preference>, ApiServiceError>;

    async fn list_by_user_id(&self, user_id: Uuid) -> Result<Vec<Preference>, ApiServiceError>;

    /// Update the supplied subset of fields. Returns `None` when the id does
    /// not resolve.
    async fn update(
        &self,
        id: i32,
        key: Option<&str>,
        value: Option<&str>,
    ) -> Result<Option<Preference>, ApiServiceError>;

    /// Delete a preference. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiServiceError>;
}

/// Repository for meals.
pub trait MealRepository: Send + Sync {
    /// Insert a meal. An unknown user surfaces as `UserNotFound`.
    async fn create(&self, meal: &NewMeal) -> Result<Meal, ApiServiceError>;

    async fn list_all(&self) -> Result<Vec<Meal>, ApiServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Meal>, ApiServiceError>;

    /// Apply the supplied subset of fields. Returns `None` when the id does
    /// not resolve.
    async fn update(&self, id: i32, changes: &MealChanges)
    -> Result<Option<Meal>, ApiServiceError>;

    /// Delete a meal. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiServiceError>;
}

/// Repository for posts and their category links.
pub trait PostRepository: Send + Sync {
    /// Insert a post. An unknown author surfaces as `UserNotFound`.
    async fn create(&self, post: &Post) -> Result<(), ApiServiceError>;

    async fn list_all(&self) -> Result<Vec<Post>, ApiServiceError>;

    async fn find_by_id(&self, id: Uuid)
    -> Result<Option<(Post, Vec<Uuid>)>, ApiServiceError>;

    /// Apply the supplied subset of fields; a present `categories` list
    /// replaces the link set in the same transaction as the row update.
    /// Returns `None` when the id does not resolve.
    async fn update(
        &self,
        id: Uuid,
        changes: &PostChanges,
    ) -> Result<Option<(Post, Vec<Uuid>)>, ApiServiceError>;

    /// Delete a post. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiServiceError>;
}

/// Port for the filesystem-backed attachment store.
pub trait AttachmentStore: Send + Sync {
    /// Persist a staged upload under a generated name and return its path
    /// relative to the uploads root.
    async fn store(
        &self,
        kind: AttachmentKind,
        title: Option<&str>,
        upload: &StagedUpload,
    ) -> Result<String, ApiServiceError>;

    /// Delete a stored file. Returns `false` when the file was already
    /// absent; that is not an error.
    async fn delete(&self, path: &str) -> Result<bool, ApiServiceError>;
}
