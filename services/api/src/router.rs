use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use nutrilife_core::health::{healthz, readyz};
use nutrilife_core::middleware::request_id_layer;

use crate::handlers::meal::{create_meal, delete_meal, get_meal, get_meals, update_meal};
use crate::handlers::post::{create_post, delete_post, get_post, get_posts, update_post};
use crate::handlers::preference::{
    create_preference, delete_preference, get_preferences, get_user_preferences,
    update_preference,
};
use crate::handlers::profile::{create_profile, delete_profile, get_profile, update_profile};
use crate::handlers::user::{create_user, delete_user, get_user, get_users};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(create_user))
        .route("/users", get(get_users))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}", delete(delete_user))
        // Profiles
        .route("/profile/{user_id}", post(create_profile))
        .route("/profile/{user_id}", get(get_profile))
        .route("/profile/{user_id}", put(update_profile))
        .route("/profile/{user_id}", delete(delete_profile))
        // Preferences. GET takes a user id in the wildcard, PUT and DELETE a
        // preference id.
        .route("/preferences", post(create_preference))
        .route("/preferences", get(get_preferences))
        .route("/preferences/{id}", get(get_user_preferences))
        .route("/preferences/{id}", put(update_preference))
        .route("/preferences/{id}", delete(delete_preference))
        // Meals
        .route("/meals", post(create_meal))
        .route("/meals", get(get_meals))
        .route("/meals/{meal_id}", get(get_meal))
        .route("/meals/{meal_id}", put(update_meal))
        .route("/meals/{meal_id}", delete(delete_meal))
        // Posts
        .route("/posts", post(create_post))
        .route("/posts", get(get_posts))
        .route("/posts/{post_id}", get(get_post))
        .route("/posts/{post_id}", put(update_post))
        .route("/posts/{post_id}", delete(delete_post))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
