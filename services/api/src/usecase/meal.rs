use crate::domain::repository::{AttachmentStore, MealRepository};
use crate::domain::types::{AttachmentKind, Meal, MealChanges, NewMeal, StagedUpload};
use crate::error::ApiServiceError;
use crate::usecase::{parse_calories, parse_datetime, require_user_id};

// ── CreateMeal ───────────────────────────────────────────────────────────────

pub struct CreateMealInput {
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub calories: Option<String>,
    pub datetime: Option<String>,
    pub image: Option<StagedUpload>,
}

pub struct CreateMealUseCase<R: MealRepository, S: AttachmentStore> {
    pub repo: R,
    pub store: S,
}

impl<R: MealRepository, S: AttachmentStore> CreateMealUseCase<R, S> {
    pub async fn execute(&self, input: CreateMealInput) -> Result<Meal, ApiServiceError> {
        let user_id = require_user_id(input.user_id.as_deref())?;
        let calories = parse_calories(input.calories.as_deref())?;
        let datetime =
            parse_datetime(input.datetime.as_deref())?.ok_or(ApiServiceError::MissingData)?;
        let image = match &input.image {
            Some(upload) => Some(
                self.store
                    .store(AttachmentKind::Meals, input.title.as_deref(), upload)
                    .await?,
            ),
            None => None,
        };
        let meal = NewMeal {
            user_id,
            title: input.title,
            description: input.description,
            calories,
            datetime,
            image: image.clone(),
        };
        match self.repo.create(&meal).await {
            Ok(created) => Ok(created),
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

// ── ListMeals ────────────────────────────────────────────────────────────────

pub struct ListMealsUseCase<R: MealRepository> {
    pub repo: R,
}

impl<R: MealRepository> ListMealsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Meal>, ApiServiceError> {
        self.repo.list_all().await
    }
}

// ── GetMeal ──────────────────────────────────────────────────────────────────

pub struct GetMealUseCase<R: MealRepository> {
    pub repo: R,
}

impl<R: MealRepository> GetMealUseCase<R> {
    pub async fn execute(&self, meal_id: i32) -> Result<Meal, ApiServiceError> {
        self.repo
            .find_by_id(meal_id)
            .await?
            .ok_or(ApiServiceError::MealNotFound)
    }
}

// ── UpdateMeal ───────────────────────────────────────────────────────────────

pub struct UpdateMealInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub calories: Option<String>,
    pub datetime: Option<String>,
    pub image: Option<StagedUpload>,
}

pub struct UpdateMealUseCase<R: MealRepository, S: AttachmentStore> {
    pub repo: R,
    pub store: S,
}

impl<R: MealRepository, S: AttachmentStore> UpdateMealUseCase<R, S> {
    pub async fn execute(
        &self,
        meal_id: i32,
        input: UpdateMealInput,
    ) -> Result<Meal, ApiServiceError> {
        let existing = self
            .repo
            .find_by_id(meal_id)
            .await?
            .ok_or(ApiServiceError::MealNotFound)?;
        let calories = parse_calories(input.calories.as_deref())?;
        let datetime = parse_datetime(input.datetime.as_deref())?;
        let image = match &input.image {
            Some(upload) => {
                let title = input.title.as_deref().or(existing.title.as_deref());
                let new_path = self
                    .store
                    .store(AttachmentKind::Meals, title, upload)
                    .await?;
                // At most one live file per meal: the replaced file goes away
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
        let changes = MealChanges {
            title: input.title,
            description: input.description,
            calories,
            datetime,
            image,
        };
        self.repo
            .update(meal_id, &changes)
            .await?
            .ok_or(ApiServiceError::MealNotFound)
    }
}

// ── DeleteMeal ───────────────────────────────────────────────────────────────

pub struct DeleteMealUseCase<R: MealRepository, S: AttachmentStore> {
    pub repo: R,
    pub store: S,
}

impl<R: MealRepository, S: AttachmentStore> DeleteMealUseCase<R, S> {
    pub async fn execute(&self, meal_id: i32) -> Result<(), ApiServiceError> {
        let meal = self
            .repo
            .find_by_id(meal_id)
            .await?
            .ok_or(ApiServiceError::MealNotFound)?;
        if let Some(image) = &meal.image {
            // Best-effort, idempotent: an already-absent file is fine, and a
            // failed delete never blocks the row removal.
            if let Err(e) = self.store.delete(image).await {
                tracing::warn!(error = %e, path = %image, "failed to remove attachment of deleted meal");
            }
        }
        let deleted = self.repo.delete(meal_id).await?;
        if !deleted {
            return Err(ApiServiceError::MealNotFound);
        }
        Ok(())
    }
}
