//! Storage ports.
//!
//! Methods return `impl Future + Send` so handlers stay `Send` when generic
//! over [`Storage`]. Implementations may use plain `async fn`.

use std::future::Future;

use uuid::Uuid;

use crate::domain::types::{
    Actor, Filmography, Movie, MovieCredit, MovieOrder, MovieSearch, User,
};
use crate::error::CatalogServiceError;

pub trait ActorRepository: Send + Sync {
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Actor>, CatalogServiceError>> + Send;

    /// Insert the actor and link every credit with the same name that has no
    /// actor yet. One transaction.
    fn create(&self, actor: &Actor) -> impl Future<Output = Result<(), CatalogServiceError>> + Send;

    /// Overwrite the stored row, rename the credits linked to this actor and
    /// link unlinked credits matching the new name. One transaction.
    /// Returns `false` if no actor has `actor.id`.
    fn update(
        &self,
        actor: &Actor,
    ) -> impl Future<Output = Result<bool, CatalogServiceError>> + Send;

    /// Returns `false` if nothing was deleted. Credits keep the name and lose
    /// the link.
    fn delete(&self, id: Uuid) -> impl Future<Output = Result<bool, CatalogServiceError>> + Send;

    /// Linked actors and the movies they appear in, both sorted by name.
    fn filmography(
        &self,
    ) -> impl Future<Output = Result<Filmography, CatalogServiceError>> + Send;
}

pub trait MovieRepository: Send + Sync {
    /// Movie with its cast in list order.
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Movie>, CatalogServiceError>> + Send;

    /// Insert the movie and one credit per `actor_list` entry, resolving each
    /// name to an existing actor. One transaction.
    fn create(&self, movie: &Movie) -> impl Future<Output = Result<(), CatalogServiceError>> + Send;

    /// Overwrite the stored row. With `replace_cast`, the credits are rebuilt
    /// from `movie.actor_list`. One transaction. Returns `false` if no movie
    /// has `movie.id`.
    fn update(
        &self,
        movie: &Movie,
        replace_cast: bool,
    ) -> impl Future<Output = Result<bool, CatalogServiceError>> + Send;

    /// Returns `false` if nothing was deleted. Credits go with the movie.
    fn delete(&self, id: Uuid) -> impl Future<Output = Result<bool, CatalogServiceError>> + Send;

    fn list(
        &self,
        order: MovieOrder,
    ) -> impl Future<Output = Result<Vec<Movie>, CatalogServiceError>> + Send;

    /// Movies whose title contains `search.title` and, when `search.actor` is
    /// not empty, with at least one credit containing it. Only matching
    /// credits are returned in `actor_list`. Ordered by name, then id.
    fn search(
        &self,
        search: &MovieSearch,
    ) -> impl Future<Output = Result<Vec<Movie>, CatalogServiceError>> + Send;

    fn credits(
        &self,
        movie_id: Uuid,
    ) -> impl Future<Output = Result<Vec<MovieCredit>, CatalogServiceError>> + Send;
}

pub trait UserRepository: Send + Sync {
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, CatalogServiceError>> + Send;

    fn create(&self, user: &User) -> impl Future<Output = Result<(), CatalogServiceError>> + Send;
}

/// A storage backend handing out repositories that share one connection.
pub trait Storage: Clone + Send + Sync + 'static {
    type Actors: ActorRepository;
    type Movies: MovieRepository;
    type Users: UserRepository;

    fn actors(&self) -> Self::Actors;
    fn movies(&self) -> Self::Movies;
    fn users(&self) -> Self::Users;

    /// Round trip to the backend, used by the readiness check.
    fn ping(&self) -> impl Future<Output = Result<(), CatalogServiceError>> + Send;
}
