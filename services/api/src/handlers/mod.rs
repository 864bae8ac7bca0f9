pub mod meal;
pub mod post;
pub mod preference;
pub mod profile;
pub mod user;

use serde::Serialize;

/// Body of the 200 response returned by delete operations.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
