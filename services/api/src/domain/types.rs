use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Account role. Lowercase strings on the wire and in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

/// Account record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Biography profile, at most one per user.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Key/value preference entry.
#[derive(Debug, Clone)]
pub struct Preference {
    pub id: i32,
    pub user_id: Uuid,
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

/// Preference payload before the storage gateway assigns an id.
#[derive(Debug, Clone)]
pub struct NewPreference {
    pub user_id: Uuid,
    pub key: String,
    pub value: String,
}

/// Meal record. `image` is the attachment path relative to the uploads root.
#[derive(Debug, Clone)]
pub struct Meal {
    pub id: i32,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub calories: Option<i32>,
    pub datetime: DateTime<Utc>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Meal payload before the storage gateway assigns an id.
#[derive(Debug, Clone)]
pub struct NewMeal {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub calories: Option<i32>,
    pub datetime: DateTime<Utc>,
    pub image: Option<String>,
}

/// Field subset for a meal update. `None` leaves the column untouched; the
/// stored image reference in particular is never cleared implicitly.
#[derive(Debug, Clone, Default)]
pub struct MealChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub calories: Option<i32>,
    pub datetime: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

/// Authored post.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field subset for a post update. `categories`, when present, fully
/// replaces the post↔category link set.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: Option<bool>,
    pub image: Option<String>,
    pub categories: Option<Vec<Uuid>>,
}

/// An uploaded file staged by the multipart layer, not yet persisted.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    pub original_filename: String,
    pub data: Bytes,
}

/// Which per-entity directory an attachment lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Meals,
    Posts,
}

impl AttachmentKind {
    pub fn dir(self) -> &'static str {
        match self {
            Self::Meals => "meals",
            Self::Posts => "posts",
        }
    }
}
