use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cinema_auth_types::bearer::BearerToken;
use cinema_auth_types::token::TokenSigner;
use cinema_domain::role::Role;

use crate::domain::repository::Storage;
use crate::domain::types::{Actor, ActorPatch, Filmography, NewActor};
use crate::error::CatalogServiceError;
use crate::handlers::{authorize, json_body};
use crate::state::AppState;
use crate::usecase::actor::{
    CreateActorUseCase, DeleteActorUseCase, GetActorListUseCase, GetActorUseCase,
    UpdateActorUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

/// Body of create and update. `null` reads as the empty value, and on update
/// empty fields keep the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ActorPayload {
    #[serde(default, deserialize_with = "cinema_core::serde::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "cinema_core::serde::null_as_default")]
    pub gender: String,
    #[serde(default, with = "cinema_core::serde::date_opt")]
    pub birth_date: Option<NaiveDate>,
}

impl From<ActorPayload> for NewActor {
    fn from(p: ActorPayload) -> Self {
        NewActor {
            name: p.name,
            gender: p.gender,
            birth_date: p.birth_date,
        }
    }
}

impl From<ActorPayload> for ActorPatch {
    fn from(p: ActorPayload) -> Self {
        ActorPatch {
            name: Some(p.name),
            gender: Some(p.gender),
            birth_date: p.birth_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    #[serde(with = "cinema_core::serde::date_opt")]
    pub birth_date: Option<NaiveDate>,
}

impl From<Actor> for ActorResponse {
    fn from(a: Actor) -> Self {
        Self {
            id: a.id,
            name: a.name,
            gender: a.gender,
            birth_date: a.birth_date,
        }
    }
}

// ── POST /actors ─────────────────────────────────────────────────────────────

pub async fn create_actor<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    payload: Result<Json<ActorPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ActorResponse>), CatalogServiceError> {
    authorize(&state, &token, Role::Admin)?;
    let body = json_body(payload)?;
    let uc = CreateActorUseCase {
        repo: state.storage.actors(),
    };
    let actor = uc.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(actor.into())))
}

// ── GET /actors ──────────────────────────────────────────────────────────────

pub async fn get_actor_list<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
) -> Result<Json<Filmography>, CatalogServiceError> {
    authorize(&state, &token, Role::User)?;
    let uc = GetActorListUseCase {
        repo: state.storage.actors(),
    };
    Ok(Json(uc.execute().await?))
}

// ── GET /actors/{id} ─────────────────────────────────────────────────────────

pub async fn get_actor<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    Path(id): Path<String>,
) -> Result<Json<ActorResponse>, CatalogServiceError> {
    authorize(&state, &token, Role::User)?;
    let uc = GetActorUseCase {
        repo: state.storage.actors(),
    };
    Ok(Json(uc.execute(&id).await?.into()))
}

// ── PATCH /actors/{id} ───────────────────────────────────────────────────────

pub async fn update_actor<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    Path(id): Path<String>,
    payload: Result<Json<ActorPayload>, JsonRejection>,
) -> Result<StatusCode, CatalogServiceError> {
    authorize(&state, &token, Role::Admin)?;
    let body = json_body(payload)?;
    let uc = UpdateActorUseCase {
        repo: state.storage.actors(),
    };
    uc.execute(&id, body.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /actors/{id} ──────────────────────────────────────────────────────

pub async fn delete_actor<S: Storage, T: TokenSigner>(
    token: BearerToken,
    State(state): State<AppState<S, T>>,
    Path(id): Path<String>,
) -> Result<StatusCode, CatalogServiceError> {
    authorize(&state, &token, Role::Admin)?;
    let uc = DeleteActorUseCase {
        repo: state.storage.actors(),
    };
    uc.execute(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
