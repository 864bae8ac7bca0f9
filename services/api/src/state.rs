use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbMealRepository, DbPostRepository, DbPreferenceRepository, DbProfileRepository,
    DbUserRepository,
};
use crate::infra::uploads::FsAttachmentStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub attachments: FsAttachmentStore,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn preference_repo(&self) -> DbPreferenceRepository {
        DbPreferenceRepository {
            db: self.db.clone(),
        }
    }

    pub fn meal_repo(&self) -> DbMealRepository {
        DbMealRepository {
            db: self.db.clone(),
        }
    }

    pub fn post_repo(&self) -> DbPostRepository {
        DbPostRepository {
            db: self.db.clone(),
        }
    }

    pub fn attachment_store(&self) -> FsAttachmentStore {
        self.attachments.clone()
    }
}
