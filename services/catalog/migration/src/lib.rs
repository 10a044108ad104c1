use sea_orm_migration::prelude::*;

mod m20250301_000001_create_actors;
mod m20250301_000002_create_movies;
mod m20250301_000003_create_movie_actors;
mod m20250301_000004_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_actors::Migration),
            Box::new(m20250301_000002_create_movies::Migration),
            Box::new(m20250301_000003_create_movie_actors::Migration),
            Box::new(m20250301_000004_create_users::Migration),
        ]
    }
}
