use uuid::Uuid;

use crate::domain::repository::ActorRepository;
use crate::domain::types::{Actor, ActorPatch, Filmography, NewActor};
use crate::error::CatalogServiceError;
use crate::usecase::parse_id;

// ── CreateActor ──────────────────────────────────────────────────────────────

pub struct CreateActorUseCase<R: ActorRepository> {
    pub repo: R,
}

impl<R: ActorRepository> CreateActorUseCase<R> {
    pub async fn execute(&self, input: NewActor) -> Result<Actor, CatalogServiceError> {
        if input.name.is_empty() {
            return Err(CatalogServiceError::EmptyName);
        }
        let actor = Actor {
            id: Uuid::now_v7(),
            name: input.name,
            gender: input.gender,
            birth_date: input.birth_date,
        };
        self.repo.create(&actor).await?;
        tracing::info!(actor_id = %actor.id, name = %actor.name, "actor created");
        Ok(actor)
    }
}

// ── GetActor ─────────────────────────────────────────────────────────────────

pub struct GetActorUseCase<R: ActorRepository> {
    pub repo: R,
}

impl<R: ActorRepository> GetActorUseCase<R> {
    pub async fn execute(&self, id: &str) -> Result<Actor, CatalogServiceError> {
        let id = parse_id(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogServiceError::ActorNotFound)
    }
}

// ── UpdateActor ──────────────────────────────────────────────────────────────

pub struct UpdateActorUseCase<R: ActorRepository> {
    pub repo: R,
}

impl<R: ActorRepository> UpdateActorUseCase<R> {
    /// Fields left empty in `patch` keep their stored value.
    pub async fn execute(&self, id: &str, patch: ActorPatch) -> Result<Actor, CatalogServiceError> {
        let id = parse_id(id)?;
        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogServiceError::ActorNotFound)?;
        let updated = patch.apply(&current);
        // Deleted between the read and the write.
        if !self.repo.update(&updated).await? {
            return Err(CatalogServiceError::ActorNotFound);
        }
        Ok(updated)
    }
}

// ── DeleteActor ──────────────────────────────────────────────────────────────

pub struct DeleteActorUseCase<R: ActorRepository> {
    pub repo: R,
}

impl<R: ActorRepository> DeleteActorUseCase<R> {
    pub async fn execute(&self, id: &str) -> Result<(), CatalogServiceError> {
        let id = parse_id(id)?;
        if !self.repo.delete(id).await? {
            return Err(CatalogServiceError::ActorNotFound);
        }
        tracing::info!(actor_id = %id, "actor deleted");
        Ok(())
    }
}

// ── GetActorList ─────────────────────────────────────────────────────────────

pub struct GetActorListUseCase<R: ActorRepository> {
    pub repo: R,
}

impl<R: ActorRepository> GetActorListUseCase<R> {
    pub async fn execute(&self) -> Result<Filmography, CatalogServiceError> {
        self.repo.filmography().await
    }
}
