use uuid::Uuid;

use cinema_domain::sort::Sort;

use crate::domain::repository::MovieRepository;
use crate::domain::types::{Movie, MovieOrder, MoviePatch, MovieSearch, MovieSortBy, NewMovie};
use crate::error::CatalogServiceError;
use crate::usecase::parse_id;

// ── CreateMovie ──────────────────────────────────────────────────────────────

pub struct CreateMovieUseCase<R: MovieRepository> {
    pub repo: R,
}

impl<R: MovieRepository> CreateMovieUseCase<R> {
    pub async fn execute(&self, input: NewMovie) -> Result<Movie, CatalogServiceError> {
        input
            .validate()
            .map_err(CatalogServiceError::InvalidMovie)?;
        let movie = input.into_movie(Uuid::now_v7());
        self.repo.create(&movie).await?;
        tracing::info!(
            movie_id = %movie.id,
            name = %movie.name,
            cast = movie.actor_list.len(),
            "movie created"
        );
        Ok(movie)
    }
}

// ── GetMovie ─────────────────────────────────────────────────────────────────

pub struct GetMovieUseCase<R: MovieRepository> {
    pub repo: R,
}

impl<R: MovieRepository> GetMovieUseCase<R> {
    pub async fn execute(&self, id: &str) -> Result<Movie, CatalogServiceError> {
        let id = parse_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogServiceError::MovieNotFound)
    }
}

// ── UpdateMovie ──────────────────────────────────────────────────────────────

pub struct UpdateMovieUseCase<R: MovieRepository> {
    pub repo: R,
}

impl<R: MovieRepository> UpdateMovieUseCase<R> {
    /// Merge `patch` onto the stored movie and re-validate. A non-empty
    /// `actor_list` replaces the whole cast.
    pub async fn execute(&self, id: &str, patch: MoviePatch) -> Result<Movie, CatalogServiceError> {
        let id = parse_id(id)?;
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogServiceError::MovieNotFound)?;
        let updated = patch.apply(&current);
        updated
            .validate()
            .map_err(CatalogServiceError::InvalidMovie)?;
        if !self.repo.update(&updated, patch.replaces_cast()).await? {
            return Err(CatalogServiceError::MovieNotFound);
        }
        Ok(updated)
    }
}

// ── DeleteMovie ──────────────────────────────────────────────────────────────

pub struct DeleteMovieUseCase<R: MovieRepository> {
    pub repo: R,
}

impl<R: MovieRepository> DeleteMovieUseCase<R> {
    pub async fn execute(&self, id: &str) -> Result<(), CatalogServiceError> {
        let id = parse_id(id)?;
        if !self.repo.delete(id).await? {
            return Err(CatalogServiceError::MovieNotFound);
        }
        tracing::info!(movie_id = %id, "movie deleted");
        Ok(())
    }
}

// ── GetMovieList ─────────────────────────────────────────────────────────────

pub struct GetMovieListUseCase<R: MovieRepository> {
    pub repo: R,
}

impl<R: MovieRepository> GetMovieListUseCase<R> {
    /// Missing or empty parameters fall back to rating, descending.
    pub async fn execute(
        &self,
        sort_by: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Vec<Movie>, CatalogServiceError> {
        let order = parse_order(sort_by, direction)?;
        self.repo.list(order).await
    }
}

pub fn parse_order(
    sort_by: Option<&str>,
    direction: Option<&str>,
) -> Result<MovieOrder, CatalogServiceError> {
    let by = match sort_by.filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<MovieSortBy>()
            .map_err(|e| CatalogServiceError::InvalidSort(e.0))?,
        None => MovieSortBy::default(),
    };
    let direction = match direction.filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<Sort>()
            .map_err(|e| CatalogServiceError::InvalidSort(e.0))?,
        None => Sort::default(),
    };
    Ok(MovieOrder { by, direction })
}

// ── SearchMovies ─────────────────────────────────────────────────────────────

pub struct SearchMoviesUseCase<R: MovieRepository> {
    pub repo: R,
}

impl<R: MovieRepository> SearchMoviesUseCase<R> {
    pub async fn execute(&self, search: MovieSearch) -> Result<Vec<Movie>, CatalogServiceError> {
        self.repo.search(&search).await
    }
}
