use axum::{
    Json,
    extract::{Path, RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cinema_auth_types::bearer::BearerToken;
use cinema_auth_types::token::TokenSigner;
use cinema_domain::role::Role;

use crate::domain::repository::Storage;
use crate::domain::types::{Movie, MoviePatch, MovieSearch, NewMovie};
use crate::error::CatalogServiceError;
use crate::handlers::{authorize, json_body};
use crate::state::AppState;
use crate::usecase::movie::{
    CreateMovieUseCase, DeleteMovieUseCase, GetMovieListUseCase, GetMovieUseCase,
    SearchMoviesUseCase, UpdateMovieUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

/// Body of create and update. `null` reads as the empty value. On update,
/// empty strings, a zero rating and an empty `actor_list` keep the stored
/// value.
#[derive(Debug, Default, Deserialize)]
pub struct MoviePayload {
    #[serde(default, deserialize_with = "cinema_core::serde::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "cinema_core::serde::null_as_default")]
    pub description: String,
    #[serde(default, with = "cinema_core::serde::date_opt")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "cinema_core::serde::null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "cinema_core::serde::null_as_default")]
    pub actor_list: Vec<String>,
}

impl From<MoviePayload> for NewMovie {
    fn from(p: MoviePayload) -> Self {
        NewMovie {
            name: p.name,
            description: p.description,
            release_date: p.release_date,
            rating: p.rating,
            actor_list: p.actor_list,
        }
    }
}

impl From<MoviePayload> for MoviePatch {
    fn from(p: MoviePayload) -> Self {
        MoviePatch {
            name: Some(p.name),
            description: Some(p.description),
            release_date: p.release_date,
            rating: Some(p.rating),
            actor_list: Some(p.actor_list),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "cinema_core::serde::date_opt")]
    pub release_date: Option<NaiveDate>,
    pub rating: f64,
    pub actor_list: Vec<String>,
}

impl From<Movie> for MovieResponse {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            release_date: m.release_date,
            rating: m.rating,
            actor_list: m.actor_list,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct MovieListQuery {
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct MovieSearchQuery {
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub title: String,
}

fn parse_query<T: serde::de::DeserializeOwned + Default>(
    raw_query: Option<String>,
    on_error: fn(String) -> CatalogServiceError,
) -> Result<T, CatalogServiceError> {
    raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|e| on_error(e.to_string()))
        .map(Option::unwrap_or_default)
}

fn into_responses(movies: Vec<Movie>) -> Json<Vec<MovieResponse>> {
    Json(movies.into_iter().map(MovieResponse::from).collect())
}

// ── POST /movies ─────────────────────────────────────────────────────────────

pub async fn create_movie<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<MovieResponse>), CatalogServiceError> {
    authorize(&state, &token, Role::Admin)?;
    let body = json_body(payload)?;
    let uc = CreateMovieUseCase {
        repo: state.storage.movies(),
    };
    let movie = uc.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(movie.into())))
}

// ── GET /movies ──────────────────────────────────────────────────────────────

pub async fn get_movie_list<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<MovieResponse>>, CatalogServiceError> {
    authorize(&state, &token, Role::User)?;
    let query: MovieListQuery = parse_query(raw_query, CatalogServiceError::InvalidSort)?;
    let uc = GetMovieListUseCase {
        repo: state.storage.movies(),
    };
    let movies = uc
        .execute(query.sort_by.as_deref(), query.direction.as_deref())
        .await?;
    Ok(into_responses(movies))
}

// ── GET /movies/search ───────────────────────────────────────────────────────

pub async fn search_movies<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<MovieResponse>>, CatalogServiceError> {
    authorize(&state, &token, Role::User)?;
    let query: MovieSearchQuery = parse_query(raw_query, CatalogServiceError::MalformedBody)?;
    let uc = SearchMoviesUseCase {
        repo: state.storage.movies(),
    };
    let movies = uc
        .execute(MovieSearch {
            title: query.title,
            actor: query.actor,
        })
        .await?;
    Ok(into_responses(movies))
}

// ── GET /movies/{id} ─────────────────────────────────────────────────────────

pub async fn get_movie<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    Path(id): Path<String>,
) -> Result<Json<MovieResponse>, CatalogServiceError> {
    authorize(&state, &token, Role::User)?;
    let uc = GetMovieUseCase {
        repo: state.storage.movies(),
    };
    Ok(Json(uc.execute(&id).await?.into()))
}

// ── PATCH /movies/{id} ───────────────────────────────────────────────────────

pub async fn update_movie<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    Path(id): Path<String>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> Result<StatusCode, CatalogServiceError> {
    authorize(&state, &token, Role::Admin)?;
    let body = json_body(payload)?;
    let uc = UpdateMovieUseCase {
        repo: state.storage.movies(),
    };
    uc.execute(&id, body.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /movies/{id} ──────────────────────────────────────────────────────

pub async fn delete_movie<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogServiceError> {
    authorize(&state, &token, Role::Admin)?;
    let uc = DeleteMovieUseCase {
        repo: state.storage.movies(),
    };
    uc.execute(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
