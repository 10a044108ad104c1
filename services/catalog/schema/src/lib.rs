//! SeaORM entities for the catalog tables.

pub mod actors;
pub mod movie_actors;
pub mod movies;
pub mod users;
