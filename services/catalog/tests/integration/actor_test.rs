use uuid::Uuid;

use cinema_catalog::domain::repository::{MovieRepository, Storage};
use cinema_catalog::domain::types::{ActorPatch, MovieCredit};
use cinema_catalog::error::CatalogServiceError;
use cinema_catalog::infra::memory::MemoryStorage;
use cinema_catalog::usecase::actor::{
    CreateActorUseCase, DeleteActorUseCase, GetActorListUseCase, GetActorUseCase,
    UpdateActorUseCase,
};

use crate::helpers::{new_actor, seed_actor, seed_movie};

// ── Create / Get ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_created_actor_unchanged() {
    let storage = MemoryStorage::new();
    let created = seed_actor(&storage, "Julia Roberts").await;

    let loaded = GetActorUseCase {
        repo: storage.actors(),
    }
    .execute(&created.id.to_string())
    .await
    .unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Julia Roberts");
    assert_eq!(loaded.gender, "female");
}

#[tokio::test]
async fn should_not_persist_actor_with_empty_name() {
    let storage = MemoryStorage::new();
    let result = CreateActorUseCase {
        repo: storage.actors(),
    }
    .execute(new_actor(""))
    .await;
    assert!(matches!(result, Err(CatalogServiceError::EmptyName)));

    // A movie naming "" would be linked if the actor had been stored.
    let movie = seed_movie(&storage, "Nameless", 5.0, &[""]).await;
    let credits = storage.movies().credits(movie.id).await.unwrap();
    assert_eq!(credits[0].actor_id, None);
}

// ── Join reconciliation ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_link_existing_credit_when_actor_is_created_later() {
    let storage = MemoryStorage::new();
    let movie = seed_movie(&storage, "Runaway Bride", 5.6, &["Jane"]).await;

    let before = storage.movies().credits(movie.id).await.unwrap();
    assert_eq!(
        before,
        vec![MovieCredit {
            actor_name: "Jane".to_owned(),
            actor_id: None,
        }]
    );

    let jane = seed_actor(&storage, "Jane").await;

    let after = storage.movies().credits(movie.id).await.unwrap();
    assert_eq!(
        after,
        vec![MovieCredit {
            actor_name: "Jane".to_owned(),
            actor_id: Some(jane.id),
        }]
    );
}

#[tokio::test]
async fn should_link_credit_at_movie_creation_when_actor_exists() {
    let storage = MemoryStorage::new();
    let tom = seed_actor(&storage, "Tom Hanks").await;
    let movie = seed_movie(&storage, "Big", 7.3, &["Tom Hanks", "Elizabeth Perkins"]).await;

    let credits = storage.movies().credits(movie.id).await.unwrap();
    assert_eq!(credits[0].actor_id, Some(tom.id));
    assert_eq!(credits[1].actor_id, None);
}

#[tokio::test]
async fn should_rename_linked_credits_and_link_orphans_of_new_name() {
    let storage = MemoryStorage::new();
    let actor = seed_actor(&storage, "Jane").await;
    let linked = seed_movie(&storage, "Linked", 6.0, &["Jane"]).await;
    let orphan = seed_movie(&storage, "Orphan", 6.0, &["Jane Doe"]).await;

    UpdateActorUseCase {
        repo: storage.actors(),
    }
    .execute(
        &actor.id.to_string(),
        ActorPatch {
            name: Some("Jane Doe".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    for movie_id in [linked.id, orphan.id] {
        let credits = storage.movies().credits(movie_id).await.unwrap();
        assert_eq!(
            credits,
            vec![MovieCredit {
                actor_name: "Jane Doe".to_owned(),
                actor_id: Some(actor.id),
            }]
        );
    }

    let list = GetActorListUseCase {
        repo: storage.actors(),
    }
    .execute()
    .await
    .unwrap();
    assert!(!list.contains_key("Jane"));
    assert_eq!(
        list["Jane Doe"],
        vec!["Linked".to_owned(), "Orphan".to_owned()]
    );
}

// ── Update ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_treat_empty_patch_as_no_op() {
    let storage = MemoryStorage::new();
    let created = seed_actor(&storage, "Julia Roberts").await;
    let uc = UpdateActorUseCase {
        repo: storage.actors(),
    };
    uc.execute(
        &created.id.to_string(),
        ActorPatch {
            name: Some(String::new()),
            gender: Some(String::new()),
            birth_date: None,
        },
    )
    .await
    .unwrap();

    let loaded = GetActorUseCase {
        repo: storage.actors(),
    }
    .execute(&created.id.to_string())
    .await
    .unwrap();
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn should_fail_update_for_unknown_or_malformed_id() {
    let storage = MemoryStorage::new();
    let uc = UpdateActorUseCase {
        repo: storage.actors(),
    };
    assert!(matches!(
        uc.execute("nope", ActorPatch::default()).await,
        Err(CatalogServiceError::InvalidId)
    ));
    assert!(matches!(
        uc.execute(&Uuid::now_v7().to_string(), ActorPatch::default())
            .await,
        Err(CatalogServiceError::ActorNotFound)
    ));
}

// ── Delete / list ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_remove_actor_key_from_list_after_delete() {
    let storage = MemoryStorage::new();
    let julia = seed_actor(&storage, "Julia Roberts").await;
    seed_actor(&storage, "Tom Hanks").await;
    let movie = seed_movie(&storage, "Larry Crowne", 6.1, &["Tom Hanks", "Julia Roberts"]).await;

    let list_uc = GetActorListUseCase {
        repo: storage.actors(),
    };
    assert!(list_uc.execute().await.unwrap().contains_key("Julia Roberts"));

    DeleteActorUseCase {
        repo: storage.actors(),
    }
    .execute(&julia.id.to_string())
    .await
    .unwrap();

    let list = list_uc.execute().await.unwrap();
    assert!(!list.contains_key("Julia Roberts"));
    assert_eq!(list["Tom Hanks"], vec!["Larry Crowne".to_owned()]);

    // The credit keeps the name but loses the link.
    let credits = storage.movies().credits(movie.id).await.unwrap();
    assert_eq!(
        credits[1],
        MovieCredit {
            actor_name: "Julia Roberts".to_owned(),
            actor_id: None,
        }
    );
}

#[tokio::test]
async fn should_fail_delete_of_missing_actor() {
    let storage = MemoryStorage::new();
    let result = DeleteActorUseCase {
        repo: storage.actors(),
    }
    .execute(&Uuid::now_v7().to_string())
    .await;
    assert!(matches!(result, Err(CatalogServiceError::ActorNotFound)));
}

#[tokio::test]
async fn should_sort_actor_list_keys_and_movies() {
    let storage = MemoryStorage::new();
    seed_actor(&storage, "Tom Hanks").await;
    seed_actor(&storage, "Robin Wright").await;
    seed_movie(&storage, "Forrest Gump", 8.8, &["Tom Hanks", "Robin Wright"]).await;
    seed_movie(&storage, "Cast Away", 7.8, &["Tom Hanks"]).await;
    seed_movie(&storage, "Unlinked", 1.0, &["Nobody Known"]).await;

    let list = GetActorListUseCase {
        repo: storage.actors(),
    }
    .execute()
    .await
    .unwrap();

    let keys: Vec<&str> = list.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Robin Wright", "Tom Hanks"]);
    assert_eq!(
        list["Tom Hanks"],
        vec!["Cast Away".to_owned(), "Forrest Gump".to_owned()]
    );
}
