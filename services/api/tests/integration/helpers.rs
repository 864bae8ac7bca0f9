use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use uuid::Uuid;

use nutrilife_api::domain::repository::{
    AttachmentStore, MealRepository, PostRepository, ProfileRepository, UserRepository,
};
use nutrilife_api::domain::types::{
    AttachmentKind, Meal, MealChanges, NewMeal, Post, PostChanges, Profile, StagedUpload, User,
};
use nutrilife_api::error::ApiServiceError;

// ── MemoryStore ──────────────────────────────────────────────────────────────

/// In-memory stand-in for the filesystem attachment store.
pub struct MemoryStore {
    files: Mutex<Vec<String>>,
    next: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(vec![]),
            next: AtomicUsize::new(1),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.lock().unwrap().iter().any(|f| f == path)
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl AttachmentStore for &MemoryStore {
    async fn store(
        &self,
        kind: AttachmentKind,
        title: Option<&str>,
        _upload: &StagedUpload,
    ) -> Result<String, ApiServiceError> {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        let path = format!("{}/{}-{}.jpg", kind.dir(), title.unwrap_or("untitled"), n);
        self.files.lock().unwrap().push(path.clone());
        Ok(path)
    }

    async fn delete(&self, path: &str) -> Result<bool, ApiServiceError> {
        let mut files = self.files.lock().unwrap();
        match files.iter().position(|f| f == path) {
            Some(idx) => {
                files.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MemoryMealRepo ───────────────────────────────────────────────────────────

pub struct MemoryMealRepo {
    meals: Mutex<Vec<Meal>>,
    next_id: Mutex<i32>,
}

impl MemoryMealRepo {
    pub fn new() -> Self {
        Self {
            meals: Mutex::new(vec![]),
            next_id: Mutex::new(1),
        }
    }

    pub fn row_count(&self) -> usize {
        self.meals.lock().unwrap().len()
    }
}

impl MealRepository for &MemoryMealRepo {
    async fn create(&self, meal: &NewMeal) -> Result<Meal, ApiServiceError> {
        let mut next_id = self.next_id.lock().unwrap();
        let now = Utc::now();
        let created = Meal {
            id: *next_id,
            user_id: meal.user_id,
            title: meal.title.clone(),
            description: meal.description.clone(),
            calories: meal.calories,
            datetime: meal.datetime,
            image: meal.image.clone(),
            created_at: now,
            updated_at: now,
        };
        *next_id += 1;
        self.meals.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Meal>, ApiServiceError> {
        Ok(self.meals.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Meal>, ApiServiceError> {
        Ok(self
            .meals
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn update(
        &self,
        id: i32,
        changes: &MealChanges,
    ) -> Result<Option<Meal>, ApiServiceError> {
        let mut meals = self.meals.lock().unwrap();
        let Some(meal) = meals.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            meal.title = Some(title.clone());
        }
        if let Some(description) = &changes.description {
            meal.description = Some(description.clone());
        }
        if let Some(calories) = changes.calories {
            meal.calories = Some(calories);
        }
        if let Some(datetime) = changes.datetime {
            meal.datetime = datetime;
        }
        if let Some(image) = &changes.image {
            meal.image = Some(image.clone());
        }
        meal.updated_at = Utc::now();
        Ok(Some(meal.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiServiceError> {
        let mut meals = self.meals.lock().unwrap();
        let before = meals.len();
        meals.retain(|m| m.id != id);
        Ok(meals.len() < before)
    }
}

// ── MemoryPostRepo ───────────────────────────────────────────────────────────

pub struct MemoryPostRepo {
    posts: Mutex<Vec<Post>>,
    categories: Mutex<HashMap<Uuid, Vec<Uuid>>>,
}

impl MemoryPostRepo {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(vec![]),
            categories: Mutex::new(HashMap::new()),
        }
    }

    pub fn row_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

impl PostRepository for &MemoryPostRepo {
    async fn create(&self, post: &Post) -> Result<(), ApiServiceError> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Post>, ApiServiceError> {
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<(Post, Vec<Uuid>)>, ApiServiceError> {
        let posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter().find(|p| p.id == id) else {
            return Ok(None);
        };
        let categories = self
            .categories
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_default();
        Ok(Some((post.clone(), categories)))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &PostChanges,
    ) -> Result<Option<(Post, Vec<Uuid>)>, ApiServiceError> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            post.title = Some(title.clone());
        }
        if let Some(description) = &changes.description {
            post.description = Some(description.clone());
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        if let Some(image) = &changes.image {
            post.image = Some(image.clone());
        }
        post.updated_at = Utc::now();
        let mut categories = self.categories.lock().unwrap();
        if let Some(new_set) = &changes.categories {
            categories.insert(id, new_set.clone());
        }
        Ok(Some((
            post.clone(),
            categories.get(&id).cloned().unwrap_or_default(),
        )))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiServiceError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        self.categories.lock().unwrap().remove(&id);
        Ok(posts.len() < before)
    }
}

// ── MemoryProfileRepo ────────────────────────────────────────────────────────

/// Enforces the unique-user invariant the way the storage gateway's
/// constraint does.
pub struct MemoryProfileRepo {
    profiles: Mutex<Vec<Profile>>,
}

impl MemoryProfileRepo {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(vec![]),
        }
    }

    pub fn row_count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }
}

impl ProfileRepository for &MemoryProfileRepo {
    async fn create(&self, profile: &Profile) -> Result<(), ApiServiceError> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.iter().any(|p| p.user_id == profile.user_id) {
            return Err(ApiServiceError::ProfileAlreadyExists);
        }
        profiles.push(profile.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, ApiServiceError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn update_bio(
        &self,
        user_id: Uuid,
        bio: &str,
    ) -> Result<Option<Profile>, ApiServiceError> {
        let mut profiles = self.profiles.lock().unwrap();
        let Some(profile) = profiles.iter_mut().find(|p| p.user_id == user_id) else {
            return Ok(None);
        };
        profile.bio = bio.to_owned();
        profile.updated_at = Utc::now();
        Ok(Some(profile.clone()))
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, ApiServiceError> {
        let mut profiles = self.profiles.lock().unwrap();
        let before = profiles.len();
        profiles.retain(|p| p.user_id != user_id);
        Ok(profiles.len() < before)
    }
}

// ── MemoryUserRepo ───────────────────────────────────────────────────────────

/// User store whose cascade reports the attachment paths configured per
/// user, the way the real unit of work collects them from meal and post
/// rows.
pub struct MemoryUserRepo {
    users: Mutex<Vec<User>>,
    attachment_paths: Mutex<HashMap<Uuid, Vec<String>>>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(vec![]),
            attachment_paths: Mutex::new(HashMap::new()),
        }
    }

    pub fn row_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn set_attachment_paths(&self, user_id: Uuid, paths: Vec<String>) {
        self.attachment_paths.lock().unwrap().insert(user_id, paths);
    }
}

impl UserRepository for &MemoryUserRepo {
    async fn create(
        &self,
        user: &User,
        _profile: Option<&Profile>,
    ) -> Result<(), ApiServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, ApiServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(User, Option<Profile>)>, ApiServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(|u| (u, None)))
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<Option<Vec<String>>, ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Ok(None);
        }
        Ok(Some(
            self.attachment_paths
                .lock()
                .unwrap()
                .remove(&id)
                .unwrap_or_default(),
        ))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn staged_upload(filename: &str) -> StagedUpload {
    StagedUpload {
        original_filename: filename.into(),
        data: bytes::Bytes::from_static(b"\xff\xd8\xff\xe0"),
    }
}
