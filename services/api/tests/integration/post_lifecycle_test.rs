use uuid::Uuid;

use nutrilife_api::error::ApiServiceError;
use nutrilife_api::usecase::post::{
    CreatePostInput, CreatePostUseCase, DeletePostUseCase, GetPostUseCase, UpdatePostInput,
    UpdatePostUseCase,
};

use crate::helpers::{MemoryPostRepo, MemoryStore, staged_upload};

fn empty_update() -> UpdatePostInput {
    UpdatePostInput {
        title: None,
        description: None,
        published: None,
        categories: None,
        image: None,
    }
}

#[tokio::test]
async fn post_category_set_is_replaced_not_merged() {
    let repo = MemoryPostRepo::new();
    let store = MemoryStore::new();

    let post = CreatePostUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(CreatePostInput {
        user_id: Some(Uuid::now_v7().to_string()),
        title: Some("Hello".into()),
        description: None,
        image: None,
    })
    .await
    .unwrap();
    assert!(!post.published);

    let first_set = vec![Uuid::now_v7(), Uuid::now_v7()];
    let mut assign = empty_update();
    assign.categories = Some(first_set.iter().map(Uuid::to_string).collect());
    let (_, categories) = UpdatePostUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(post.id, assign)
    .await
    .unwrap();
    assert_eq!(categories, first_set);

    // A later set with one id drops the previous links entirely.
    let second_set = vec![Uuid::now_v7()];
    let mut reassign = empty_update();
    reassign.categories = Some(second_set.iter().map(Uuid::to_string).collect());
    let (_, categories) = UpdatePostUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(post.id, reassign)
    .await
    .unwrap();
    assert_eq!(categories, second_set);

    // Updates that omit categories leave the set untouched.
    let mut publish = empty_update();
    publish.published = Some("true".into());
    let (updated, categories) = UpdatePostUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(post.id, publish)
    .await
    .unwrap();
    assert!(updated.published);
    assert_eq!(categories, second_set);
}

#[tokio::test]
async fn post_image_replacement_removes_the_old_file() {
    let repo = MemoryPostRepo::new();
    let store = MemoryStore::new();

    let post = CreatePostUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(CreatePostInput {
        user_id: Some(Uuid::now_v7().to_string()),
        title: Some("Hello".into()),
        description: None,
        image: Some(staged_upload("cover.png")),
    })
    .await
    .unwrap();
    let first_image = post.image.clone().expect("image reference set");
    assert!(store.contains(&first_image));

    let mut replacement = empty_update();
    replacement.image = Some(staged_upload("cover-v2.png"));
    let (updated, _) = UpdatePostUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(post.id, replacement)
    .await
    .unwrap();
    let second_image = updated.image.expect("image reference set");
    assert!(!store.contains(&first_image));
    assert!(store.contains(&second_image));
    assert_eq!(store.file_count(), 1);

    DeletePostUseCase {
        repo: &repo,
        store: &store,
    }
    .execute(post.id)
    .await
    .unwrap();
    assert_eq!(repo.row_count(), 0);
    assert_eq!(store.file_count(), 0);
}

#[tokio::test]
async fn unknown_post_id_is_not_found_on_every_operation() {
    let repo = MemoryPostRepo::new();
    let store = MemoryStore::new();
    let missing = Uuid::now_v7();

    assert!(matches!(
        GetPostUseCase { repo: &repo }.execute(missing).await,
        Err(ApiServiceError::PostNotFound)
    ));
    assert!(matches!(
        UpdatePostUseCase {
            repo: &repo,
            store: &store,
        }
        .execute(missing, empty_update())
        .await,
        Err(ApiServiceError::PostNotFound)
    ));
    assert!(matches!(
        DeletePostUseCase {
            repo: &repo,
            store: &store,
        }
        .execute(missing)
        .await,
        Err(ApiServiceError::PostNotFound)
    ));
}
