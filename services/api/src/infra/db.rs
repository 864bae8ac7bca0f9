use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use nutrilife_api_schema::{meals, post_categories, posts, preferences, profiles, users};

use crate::domain::repository::{
    MealRepository, PostRepository, PreferenceRepository, ProfileRepository, UserRepository,
};
use crate::domain::types::{
    Meal, MealChanges, NewMeal, NewPreference, Post, PostChanges, Preference, Profile, User,
    UserRole,
};
use crate::error::ApiServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &User, profile: Option<&Profile>) -> Result<(), ApiServiceError> {
        let user = user.clone();
        let profile = profile.cloned();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user.id),
                        name: Set(user.name),
                        email: Set(user.email),
                        role: Set(user.role.as_str().to_owned()),
                        created_at: Set(user.created_at),
                        updated_at: Set(user.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    if let Some(profile) = profile {
                        profiles::ActiveModel {
                            id: Set(profile.id),
                            user_id: Set(profile.user_id),
                            bio: Set(profile.bio),
                            created_at: Set(profile.created_at),
                            updated_at: Set(profile.updated_at),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create user")?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, ApiServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(User, Option<Profile>)>, ApiServiceError> {
        let Some(user) = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?
        else {
            return Ok(None);
        };
        let profile = profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(id))
            .one(&self.db)
            .await
            .context("find profile of user")?;
        Ok(Some((
            user_from_model(user),
            profile.map(profile_from_model),
        )))
    }

    async fn delete_cascade(&self, id: Uuid) -> Result<Option<Vec<String>>, ApiServiceError> {
        let paths = self
            .db
            .transaction::<_, Option<Vec<String>>, DbErr>(|txn| {
                Box::pin(async move {
                    if users::Entity::find_by_id(id).one(txn).await?.is_none() {
                        return Ok(None);
                    }
                    let mut paths = Vec::new();

                    // Fixed cascade order: posts, profile, preferences, meals,
                    // then the user row itself.
                    let user_posts = posts::Entity::find()
                        .filter(posts::Column::UserId.eq(id))
                        .all(txn)
                        .await?;
                    paths.extend(user_posts.iter().filter_map(|p| p.image.clone()));
                    let post_ids: Vec<Uuid> = user_posts.iter().map(|p| p.id).collect();
                    if !post_ids.is_empty() {
                        post_categories::Entity::delete_many()
                            .filter(post_categories::Column::PostId.is_in(post_ids))
                            .exec(txn)
                            .await?;
                    }
                    posts::Entity::delete_many()
                        .filter(posts::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;

                    profiles::Entity::delete_many()
                        .filter(profiles::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;

                    preferences::Entity::delete_many()
                        .filter(preferences::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;

                    let user_meals = meals::Entity::find()
                        .filter(meals::Column::UserId.eq(id))
                        .all(txn)
                        .await?;
                    paths.extend(user_meals.iter().filter_map(|m| m.image.clone()));
                    meals::Entity::delete_many()
                        .filter(meals::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;

                    users::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(Some(paths))
                })
            })
            .await
            .context("delete user cascade")?;
        Ok(paths)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        // The role column only ever holds values written through the create
        // path.
        role: UserRole::parse(&model.role).unwrap_or(UserRole::User),
        email: model.email,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn create(&self, profile: &Profile) -> Result<(), ApiServiceError> {
        let result = profiles::ActiveModel {
            id: Set(profile.id),
            user_id: Set(profile.user_id),
            bio: Set(profile.bio.clone()),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            // The unique index on user_id is the authority for the
            // one-profile-per-user invariant.
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(ApiServiceError::ProfileAlreadyExists)
                }
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(ApiServiceError::UserNotFound)
                }
                _ => Err(anyhow::Error::new(e).context("create profile").into()),
            },
        }
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, ApiServiceError> {
        let model = profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find profile by user id")?;
        Ok(model.map(profile_from_model))
    }

    async fn update_bio(
        &self,
        user_id: Uuid,
        bio: &str,
    ) -> Result<Option<Profile>, ApiServiceError> {
        let Some(model) = profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find profile for update")?
        else {
            return Ok(None);
        };
        let am = profiles::ActiveModel {
            id: Set(model.id),
            bio: Set(bio.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        match am.update(&self.db).await {
            Ok(updated) => Ok(Some(profile_from_model(updated))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update profile bio").into()),
        }
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, ApiServiceError> {
        let result = profiles::Entity::delete_many()
            .filter(profiles::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete profile by user id")?;
        Ok(result.rows_affected > 0)
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        id: model.id,
        user_id: model.user_id,
        bio: model.bio,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Preference repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPreferenceRepository {
    pub db: DatabaseConnection,
}

impl PreferenceRepository for DbPreferenceRepository {
    async fn create(&self, preference: &NewPreference) -> Result<Preference, ApiServiceError> {
        let result = preferences::ActiveModel {
            user_id: Set(preference.user_id),
            key: Set(preference.key.clone()),
            value: Set(preference.value.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(preference_from_model(model)),
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(ApiServiceError::UserNotFound)
                }
                _ => Err(anyhow::Error::new(e).context("create preference").into()),
            },
        }
    }

    async fn list_all(&self) -> Result<Vec<Preference>, ApiServiceError> {
        let models = preferences::Entity::find()
            .order_by_asc(preferences::Column::Id)
            .all(&self.db)
            .await
            .context("list preferences")?;
        Ok(models.into_iter().map(preference_from_model).collect())
    }

    async fn list_by_user_id(&self, user_id: Uuid) -> Result<Vec<Preference>, ApiServiceError> {
        let models = preferences::Entity::find()
            .filter(preferences::Column::UserId.eq(user_id))
            .order_by_asc(preferences::Column::Id)
            .all(&self.db)
            .await
            .context("list preferences by user id")?;
        Ok(models.into_iter().map(preference_from_model).collect())
    }

    async fn update(
        &self,
        id: i32,
        key: Option<&str>,
        value: Option<&str>,
    ) -> Result<Option<Preference>, ApiServiceError> {
        let mut am = preferences::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(key) = key {
            am.key = Set(key.to_owned());
        }
        if let Some(value) = value {
            am.value = Set(value.to_owned());
        }
        match am.update(&self.db).await {
            Ok(updated) => Ok(Some(preference_from_model(updated))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update preference").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiServiceError> {
        let result = preferences::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete preference")?;
        Ok(result.rows_affected > 0)
    }
}

fn preference_from_model(model: preferences::Model) -> Preference {
    Preference {
        id: model.id,
        user_id: model.user_id,
        key: model.key,
        value: model.value,
        created_at: model.created_at,
    }
}

// ── Meal repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMealRepository {
    pub db: DatabaseConnection,
}

impl MealRepository for DbMealRepository {
    async fn create(&self, meal: &NewMeal) -> Result<Meal, ApiServiceError> {
        let now = Utc::now();
        let result = meals::ActiveModel {
            user_id: Set(meal.user_id),
            title: Set(meal.title.clone()),
            description: Set(meal.description.clone()),
            calories: Set(meal.calories),
            datetime: Set(meal.datetime),
            image: Set(meal.image.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(meal_from_model(model)),
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(ApiServiceError::UserNotFound)
                }
                _ => Err(anyhow::Error::new(e).context("create meal").into()),
            },
        }
    }

    async fn list_all(&self) -> Result<Vec<Meal>, ApiServiceError> {
        let models = meals::Entity::find()
            .order_by_asc(meals::Column::Id)
            .all(&self.db)
            .await
            .context("list meals")?;
        Ok(models.into_iter().map(meal_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Meal>, ApiServiceError> {
        let model = meals::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find meal by id")?;
        Ok(model.map(meal_from_model))
    }

    async fn update(
        &self,
        id: i32,
        changes: &MealChanges,
    ) -> Result<Option<Meal>, ApiServiceError> {
        let mut am = meals::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(title) = &changes.title {
            am.title = Set(Some(title.clone()));
        }
        if let Some(description) = &changes.description {
            am.description = Set(Some(description.clone()));
        }
        if let Some(calories) = changes.calories {
            am.calories = Set(Some(calories));
        }
        if let Some(datetime) = changes.datetime {
            am.datetime = Set(datetime);
        }
        if let Some(image) = &changes.image {
            am.image = Set(Some(image.clone()));
        }
        am.updated_at = Set(Utc::now());
        match am.update(&self.db).await {
            Ok(updated) => Ok(Some(meal_from_model(updated))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update meal").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiServiceError> {
        let result = meals::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete meal")?;
        Ok(result.rows_affected > 0)
    }
}

fn meal_from_model(model: meals::Model) -> Meal {
    Meal {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        description: model.description,
        calories: model.calories,
        datetime: model.datetime,
        image: model.image,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Post repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPostRepository {
    pub db: DatabaseConnection,
}

impl PostRepository for DbPostRepository {
    async fn create(&self, post: &Post) -> Result<(), ApiServiceError> {
        let result = posts::ActiveModel {
            id: Set(post.id),
            user_id: Set(post.user_id),
            title: Set(post.title.clone()),
            description: Set(post.description.clone()),
            published: Set(post.published),
            image: Set(post.image.clone()),
            created_at: Set(post.created_at),
            updated_at: Set(post.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(ApiServiceError::UserNotFound)
                }
                _ => Err(anyhow::Error::new(e).context("create post").into()),
            },
        }
    }

    async fn list_all(&self) -> Result<Vec<Post>, ApiServiceError> {
        let models = posts::Entity::find()
            .order_by_asc(posts::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list posts")?;
        Ok(models.into_iter().map(post_from_model).collect())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(Post, Vec<Uuid>)>, ApiServiceError> {
        let Some(model) = posts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find post by id")?
        else {
            return Ok(None);
        };
        let category_ids = find_category_ids(&self.db, id).await?;
        Ok(Some((post_from_model(model), category_ids)))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &PostChanges,
    ) -> Result<Option<(Post, Vec<Uuid>)>, ApiServiceError> {
        let changes = changes.clone();
        let result = self
            .db
            .transaction::<_, Option<(posts::Model, Vec<Uuid>)>, DbErr>(|txn| {
                Box::pin(async move {
                    if posts::Entity::find_by_id(id).one(txn).await?.is_none() {
                        return Ok(None);
                    }
                    let mut am = posts::ActiveModel {
                        id: Set(id),
                        ..Default::default()
                    };
                    if let Some(title) = changes.title {
                        am.title = Set(Some(title));
                    }
                    if let Some(description) = changes.description {
                        am.description = Set(Some(description));
                    }
                    if let Some(published) = changes.published {
                        am.published = Set(published);
                    }
                    if let Some(image) = changes.image {
                        am.image = Set(Some(image));
                    }
                    am.updated_at = Set(Utc::now());
                    let updated = am.update(txn).await?;

                    // Full replacement of the link set, never a merge.
                    if let Some(category_ids) = changes.categories {
                        post_categories::Entity::delete_many()
                            .filter(post_categories::Column::PostId.eq(id))
                            .exec(txn)
                            .await?;
                        for category_id in category_ids {
                            post_categories::ActiveModel {
                                post_id: Set(id),
                                category_id: Set(category_id),
                            }
                            .insert(txn)
                            .await?;
                        }
                    }
                    let links = post_categories::Entity::find()
                        .filter(post_categories::Column::PostId.eq(id))
                        .all(txn)
                        .await?;
                    Ok(Some((
                        updated,
                        links.into_iter().map(|l| l.category_id).collect(),
                    )))
                })
            })
            .await
            .context("update post")?;
        Ok(result.map(|(model, category_ids)| (post_from_model(model), category_ids)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiServiceError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    post_categories::Entity::delete_many()
                        .filter(post_categories::Column::PostId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = posts::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete post")?;
        Ok(deleted)
    }
}

async fn find_category_ids(
    db: &DatabaseConnection,
    post_id: Uuid,
) -> Result<Vec<Uuid>, ApiServiceError> {
    let links = post_categories::Entity::find()
        .filter(post_categories::Column::PostId.eq(post_id))
        .all(db)
        .await
        .context("find post categories")?;
    Ok(links.into_iter().map(|l| l.category_id).collect())
}

fn post_from_model(model: posts::Model) -> Post {
    Post {
        id: model.id,
        user_id: model.user_id,
        title: model.title,
        description: model.description,
        published: model.published,
        image: model.image,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
