//! In-process storage with the same semantics as [`super::db::DbStorage`].
//!
//! Backs the integration tests and local runs without PostgreSQL. Each
//! repository call takes the table lock once, so every write is atomic.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use cinema_domain::sort::Sort;

use crate::domain::repository::{ActorRepository, MovieRepository, Storage, UserRepository};
use crate::domain::types::{
    Actor, Filmography, Movie, MovieCredit, MovieOrder, MovieSearch, MovieSortBy, User,
};
use crate::error::CatalogServiceError;

#[derive(Debug, Clone)]
struct MovieRow {
    id: Uuid,
    name: String,
    description: String,
    release_date: Option<NaiveDate>,
    rating: f64,
}

#[derive(Debug, Clone)]
struct CreditRow {
    movie_id: Uuid,
    position: usize,
    actor_name: String,
    actor_id: Option<Uuid>,
}

#[derive(Debug, Default)]
struct Tables {
    // Keyed by id so name lookups resolve to the lowest id, like the SQL query.
    actors: BTreeMap<Uuid, Actor>,
    movies: BTreeMap<Uuid, MovieRow>,
    credits: Vec<CreditRow>,
    users: HashMap<String, User>,
}

impl Tables {
    fn actor_id_by_name(&self, name: &str) -> Option<Uuid> {
        self.actors.values().find(|a| a.name == name).map(|a| a.id)
    }

    fn link_unlinked_credits(&mut self, actor_id: Uuid, name: &str) {
        for credit in &mut self.credits {
            if credit.actor_id.is_none() && credit.actor_name == name {
                credit.actor_id = Some(actor_id);
            }
        }
    }

    fn insert_credits(&mut self, movie_id: Uuid, names: &[String]) {
        for (position, name) in names.iter().enumerate() {
            let actor_id = self.actor_id_by_name(name);
            self.credits.push(CreditRow {
                movie_id,
                position,
                actor_name: name.clone(),
                actor_id,
            });
        }
    }

    /// Credits of `movie_id` in list order.
    fn credits_of(&self, movie_id: Uuid) -> Vec<&CreditRow> {
        let mut credits: Vec<&CreditRow> = self
            .credits
            .iter()
            .filter(|c| c.movie_id == movie_id)
            .collect();
        credits.sort_by_key(|c| c.position);
        credits
    }

    fn movie_with_cast(&self, row: &MovieRow, cast: Vec<String>) -> Movie {
        Movie {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            release_date: row.release_date,
            rating: row.rating,
            actor_list: cast,
        }
    }
}

/// Shared in-memory tables. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock(tables: &Mutex<Tables>) -> Result<MutexGuard<'_, Tables>, CatalogServiceError> {
    tables
        .lock()
        .map_err(|_| CatalogServiceError::Internal(anyhow::anyhow!("memory tables poisoned")))
}

impl Storage for MemoryStorage {
    type Actors = MemoryActorRepository;
    type Movies = MemoryMovieRepository;
    type Users = MemoryUserRepository;

    fn actors(&self) -> MemoryActorRepository {
        MemoryActorRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    fn movies(&self) -> MemoryMovieRepository {
        MemoryMovieRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    fn users(&self) -> MemoryUserRepository {
        MemoryUserRepository {
            tables: Arc::clone(&self.tables),
        }
    }

    async fn ping(&self) -> Result<(), CatalogServiceError> {
        lock(&self.tables).map(|_| ())
    }
}

// ── Actor repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemoryActorRepository {
    tables: Arc<Mutex<Tables>>,
}

impl ActorRepository for MemoryActorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Actor>, CatalogServiceError> {
        Ok(lock(&self.tables)?.actors.get(&id).cloned())
    }

    async fn create(&self, actor: &Actor) -> Result<(), CatalogServiceError> {
        let mut tables = lock(&self.tables)?;
        if tables.actors.contains_key(&actor.id) {
            return Err(anyhow::anyhow!("create actor: duplicate id {}", actor.id).into());
        }
        tables.actors.insert(actor.id, actor.clone());
        tables.link_unlinked_credits(actor.id, &actor.name);
        Ok(())
    }

    async fn update(&self, actor: &Actor) -> Result<bool, CatalogServiceError> {
        let mut tables = lock(&self.tables)?;
        let Some(stored) = tables.actors.get_mut(&actor.id) else {
            return Ok(false);
        };
        *stored = actor.clone();
        for credit in &mut tables.credits {
            if credit.actor_id == Some(actor.id) {
                credit.actor_name = actor.name.clone();
            }
        }
        tables.link_unlinked_credits(actor.id, &actor.name);
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogServiceError> {
        let mut tables = lock(&self.tables)?;
        if tables.actors.remove(&id).is_none() {
            return Ok(false);
        }
        for credit in &mut tables.credits {
            if credit.actor_id == Some(id) {
                credit.actor_id = None;
            }
        }
        Ok(true)
    }

    async fn filmography(&self) -> Result<Filmography, CatalogServiceError> {
        let tables = lock(&self.tables)?;
        let mut filmography = Filmography::new();
        for credit in &tables.credits {
            let linked = credit
                .actor_id
                .is_some_and(|id| tables.actors.contains_key(&id));
            let Some(movie) = tables.movies.get(&credit.movie_id) else {
                continue;
            };
            if linked {
                filmography
                    .entry(credit.actor_name.clone())
                    .or_default()
                    .push(movie.name.clone());
            }
        }
        for movies in filmography.values_mut() {
            movies.sort();
        }
        Ok(filmography)
    }
}

// ── Movie repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemoryMovieRepository {
    tables: Arc<Mutex<Tables>>,
}

/// NULL sorts after every date, matching PostgreSQL's default.
fn cmp_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

fn cmp_movies(a: &MovieRow, b: &MovieRow, order: MovieOrder) -> Ordering {
    let primary = match order.by {
        MovieSortBy::Name => a.name.cmp(&b.name),
        MovieSortBy::Description => a.description.cmp(&b.description),
        MovieSortBy::ReleaseDate => cmp_dates(a.release_date, b.release_date),
        MovieSortBy::Rating => a.rating.total_cmp(&b.rating),
    };
    let primary = match order.direction {
        Sort::Asc => primary,
        Sort::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

impl MovieRepository for MemoryMovieRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, CatalogServiceError> {
        let row = lock(&self.tables)?.movies.get(&id).cloned();
        let Some(row) = row else {
            return Ok(None);
        };
        let cast = self
            .credits(id)
            .await?
            .into_iter()
            .map(|c| c.actor_name)
            .collect();
        Ok(Some(Movie {
            id: row.id,
            name: row.name,
            description: row.description,
            release_date: row.release_date,
            rating: row.rating,
            actor_list: cast,
        }))
    }

    async fn create(&self, movie: &Movie) -> Result<(), CatalogServiceError> {
        let mut tables = lock(&self.tables)?;
        if tables.movies.contains_key(&movie.id) {
            return Err(anyhow::anyhow!("create movie: duplicate id {}", movie.id).into());
        }
        tables.movies.insert(
            movie.id,
            MovieRow {
                id: movie.id,
                name: movie.name.clone(),
                description: movie.description.clone(),
                release_date: movie.release_date,
                rating: movie.rating,
            },
        );
        tables.insert_credits(movie.id, &movie.actor_list);
        Ok(())
    }

    async fn update(&self, movie: &Movie, replace_cast: bool) -> Result<bool, CatalogServiceError> {
        let mut tables = lock(&self.tables)?;
        let Some(row) = tables.movies.get_mut(&movie.id) else {
            return Ok(false);
        };
        row.name = movie.name.clone();
        row.description = movie.description.clone();
        row.release_date = movie.release_date;
        row.rating = movie.rating;
        if replace_cast {
            tables.credits.retain(|c| c.movie_id != movie.id);
            tables.insert_credits(movie.id, &movie.actor_list);
        }
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogServiceError> {
        let mut tables = lock(&self.tables)?;
        if tables.movies.remove(&id).is_none() {
            return Ok(false);
        }
        tables.credits.retain(|c| c.movie_id != id);
        Ok(true)
    }

    async fn list(&self, order: MovieOrder) -> Result<Vec<Movie>, CatalogServiceError> {
        let tables = lock(&self.tables)?;
        let mut rows: Vec<&MovieRow> = tables.movies.values().collect();
        rows.sort_by(|a, b| cmp_movies(a, b, order));
        Ok(rows
            .into_iter()
            .map(|row| {
                let cast = tables
                    .credits_of(row.id)
                    .into_iter()
                    .map(|c| c.actor_name.clone())
                    .collect();
                tables.movie_with_cast(row, cast)
            })
            .collect())
    }

    async fn search(&self, search: &MovieSearch) -> Result<Vec<Movie>, CatalogServiceError> {
        let tables = lock(&self.tables)?;
        let mut rows: Vec<&MovieRow> = tables
            .movies
            .values()
            .filter(|m| m.name.contains(search.title.as_str()))
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let mut found = Vec::new();
        for row in rows {
            let cast: Vec<String> = tables
                .credits_of(row.id)
                .into_iter()
                .filter(|c| c.actor_name.contains(search.actor.as_str()))
                .map(|c| c.actor_name.clone())
                .collect();
            if !search.actor.is_empty() && cast.is_empty() {
                continue;
            }
            found.push(tables.movie_with_cast(row, cast));
        }
        Ok(found)
    }

    async fn credits(&self, movie_id: Uuid) -> Result<Vec<MovieCredit>, CatalogServiceError> {
        let tables = lock(&self.tables)?;
        Ok(tables
            .credits_of(movie_id)
            .into_iter()
            .map(|c| MovieCredit {
                actor_name: c.actor_name.clone(),
                actor_id: c.actor_id,
            })
            .collect())
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemoryUserRepository {
    tables: Arc<Mutex<Tables>>,
}

impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogServiceError> {
        Ok(lock(&self.tables)?.users.get(email).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), CatalogServiceError> {
        let mut tables = lock(&self.tables)?;
        if tables.users.contains_key(&user.email) {
            return Err(anyhow::anyhow!("create user: duplicate email {}", user.email).into());
        }
        tables.users.insert(user.email.clone(), user.clone());
        Ok(())
    }
}
