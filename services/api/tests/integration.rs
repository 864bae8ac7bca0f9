#[path = "integration/helpers.rs"]
mod helpers;

#[path = "integration/meal_lifecycle_test.rs"]
mod meal_lifecycle_test;
#[path = "integration/post_lifecycle_test.rs"]
mod post_lifecycle_test;
#[path = "integration/profile_test.rs"]
mod profile_test;
#[path = "integration/user_cascade_test.rs"]
mod user_cascade_test;
