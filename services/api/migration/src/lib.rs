use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_profiles;
mod m20260801_000003_create_preferences;
mod m20260801_000004_create_meals;
mod m20260801_000005_create_posts;
mod m20260801_000006_create_post_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_profiles::Migration),
            Box::new(m20260801_000003_create_preferences::Migration),
            Box::new(m20260801_000004_create_meals::Migration),
            Box::new(m20260801_000005_create_posts::Migration),
            Box::new(m20260801_000006_create_post_categories::Migration),
        ]
    }
}
