use uuid::Uuid;

use nutrilife_api::error::ApiServiceError;
use nutrilife_api::usecase::profile::{
    CreateProfileUseCase, DeleteProfileUseCase, GetProfileUseCase, UpdateProfileUseCase,
};

use crate::helpers::MemoryProfileRepo;

#[tokio::test]
async fn second_profile_for_a_user_conflicts_and_creates_no_row() {
    let repo = MemoryProfileRepo::new();
    let user_id = Uuid::now_v7();

    CreateProfileUseCase { repo: &repo }
        .execute(user_id, Some("runner".into()))
        .await
        .unwrap();
    assert_eq!(repo.row_count(), 1);

    let result = CreateProfileUseCase { repo: &repo }
        .execute(user_id, Some("also a cyclist".into()))
        .await;
    assert!(matches!(result, Err(ApiServiceError::ProfileAlreadyExists)));
    assert_eq!(repo.row_count(), 1);

    // A different user is unaffected by the conflict.
    CreateProfileUseCase { repo: &repo }
        .execute(Uuid::now_v7(), Some("climber".into()))
        .await
        .unwrap();
    assert_eq!(repo.row_count(), 2);
}

#[tokio::test]
async fn profile_update_is_a_full_bio_replace() {
    let repo = MemoryProfileRepo::new();
    let user_id = Uuid::now_v7();

    CreateProfileUseCase { repo: &repo }
        .execute(user_id, Some("runner".into()))
        .await
        .unwrap();
    let updated = UpdateProfileUseCase { repo: &repo }
        .execute(user_id, Some("cyclist".into()))
        .await
        .unwrap();
    assert_eq!(updated.bio, "cyclist");

    let fetched = GetProfileUseCase { repo: &repo }.execute(user_id).await.unwrap();
    assert_eq!(fetched.bio, "cyclist");
}

#[tokio::test]
async fn deleted_profile_stops_resolving() {
    let repo = MemoryProfileRepo::new();
    let user_id = Uuid::now_v7();

    CreateProfileUseCase { repo: &repo }
        .execute(user_id, Some("runner".into()))
        .await
        .unwrap();
    DeleteProfileUseCase { repo: &repo }
        .execute(user_id)
        .await
        .unwrap();
    assert_eq!(repo.row_count(), 0);

    let result = GetProfileUseCase { repo: &repo }.execute(user_id).await;
    assert!(matches!(result, Err(ApiServiceError::ProfileNotFound)));

    let result = DeleteProfileUseCase { repo: &repo }.execute(user_id).await;
    assert!(matches!(result, Err(ApiServiceError::ProfileNotFound)));
}
