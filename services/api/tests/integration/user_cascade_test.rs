use uuid::Uuid;

use nutrilife_api::error::ApiServiceError;
use nutrilife_api::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase,
};

use crate::helpers::{MemoryStore, MemoryUserRepo, staged_upload};
use nutrilife_api::domain::repository::AttachmentStore as _;
use nutrilife_api::domain::types::AttachmentKind;

#[tokio::test]
async fn deleting_a_user_removes_the_row_and_its_attachments() {
    let repo = MemoryUserRepo::new();
    let store = MemoryStore::new();

    let user = CreateUserUseCase { repo: &repo }
        .execute(CreateUserInput {
            name: Some("alice".into()),
            email: Some("alice@example.com".into()),
            role: Some("user".into()),
            bio: None,
        })
        .await
        .unwrap();

    // Two attachments that the cascade will report, one meal and one post.
    let meal_image = (&store)
        .store(AttachmentKind::Meals, Some("Lunch"), &staged_upload("a.jpg"))
        .await
        .unwrap();
    let post_image = (&store)
        .store(AttachmentKind::Posts, Some("Hello"), &staged_upload("b.jpg"))
        .await
        .unwrap();
    repo.set_attachment_paths(user.id, vec![meal_image.clone(), post_image.clone()]);

    DeleteUserUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(user.id)
    .await
    .unwrap();

    assert_eq!(repo.row_count(), 0);
    assert!(!store.contains(&meal_image));
    assert!(!store.contains(&post_image));
    assert_eq!(store.file_count(), 0);

    let result = GetUserUseCase { repo: &repo }.execute(user.id).await;
    assert!(matches!(result, Err(ApiServiceError::UserNotFound)));
}

#[tokio::test]
async fn deleting_an_unknown_user_is_not_found() {
    let repo = MemoryUserRepo::new();
    let store = MemoryStore::new();

    let result = DeleteUserUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(Uuid::now_v7())
    .await;
    assert!(matches!(result, Err(ApiServiceError::UserNotFound)));
}
