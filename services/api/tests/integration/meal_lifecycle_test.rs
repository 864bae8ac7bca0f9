use uuid::Uuid;

use nutrilife_api::error::ApiServiceError;
use nutrilife_api::usecase::meal::{
    CreateMealInput, CreateMealUseCase, DeleteMealUseCase, GetMealUseCase, UpdateMealInput,
    UpdateMealUseCase,
};

use crate::helpers::{MemoryMealRepo, MemoryStore, staged_upload};

fn create_input(user_id: Uuid) -> CreateMealInput {
    CreateMealInput {
        user_id: Some(user_id.to_string()),
        title: Some("Lunch".into()),
        description: Some("rice and beans".into()),
        calories: Some("450".into()),
        datetime: Some("2024-01-01T12:00:00Z".into()),
        image: None,
    }
}

fn empty_update() -> UpdateMealInput {
    UpdateMealInput {
        title: None,
        description: None,
        calories: None,
        datetime: None,
        image: None,
    }
}

#[tokio::test]
async fn meal_image_lifecycle_keeps_one_live_file() {
    let repo = MemoryMealRepo::new();
    let store = MemoryStore::new();

    // Create without an image: integer calories, no reference, no file.
    let created = CreateMealUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(create_input(Uuid::now_v7()))
    .await
    .unwrap();
    assert_eq!(created.calories, Some(450));
    assert!(created.image.is_none());
    assert_eq!(store.file_count(), 0);

    // First image upload sets the reference and leaves calories alone.
    let mut with_image = empty_update();
    with_image.image = Some(staged_upload("photo.jpg"));
    let updated = UpdateMealUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(created.id, with_image)
    .await
    .unwrap();
    let first_image = updated.image.clone().expect("image reference set");
    assert_eq!(updated.calories, Some(450));
    assert!(store.contains(&first_image));
    assert_eq!(store.file_count(), 1);

    // Replacing the image removes the prior file.
    let mut replacement = empty_update();
    replacement.image = Some(staged_upload("retake.jpg"));
    let updated = UpdateMealUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(created.id, replacement)
    .await
    .unwrap();
    let second_image = updated.image.clone().expect("image reference set");
    assert_ne!(second_image, first_image);
    assert!(!store.contains(&first_image));
    assert!(store.contains(&second_image));
    assert_eq!(store.file_count(), 1);

    // An update without a staged image preserves the reference.
    let mut rename = empty_update();
    rename.title = Some("Late lunch".into());
    let updated = UpdateMealUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(created.id, rename)
    .await
    .unwrap();
    assert_eq!(updated.image.as_deref(), Some(second_image.as_str()));
    assert_eq!(store.file_count(), 1);

    // Deletion removes both the row and the file.
    DeleteMealUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(created.id)
    .await
    .unwrap();
    assert_eq!(repo.row_count(), 0);
    assert_eq!(store.file_count(), 0);

    let result = GetMealUseCase { repo: &repo }.execute(created.id).await;
    assert!(matches!(result, Err(ApiServiceError::MealNotFound)));
}

#[tokio::test]
async fn malformed_calories_never_reach_storage() {
    let repo = MemoryMealRepo::new();
    let store = MemoryStore::new();

    let mut input = create_input(Uuid::now_v7());
    input.calories = Some("NaN".into());
    let result = CreateMealUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(input)
    .await;
    assert!(matches!(result, Err(ApiServiceError::InvalidCalories)));
    assert_eq!(repo.row_count(), 0);
}
