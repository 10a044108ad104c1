//! Scenarios run against every `Storage` backend. The PostgreSQL run needs
//! `TEST_DATABASE_URL` and gets a freshly migrated schema per test.

use std::collections::BTreeMap;

use uuid::Uuid;

use cinema_catalog::domain::repository::{
    ActorRepository, MovieRepository, Storage, UserRepository,
};
use cinema_catalog::domain::types::{ActorPatch, Movie, MoviePatch, MovieSearch};
use cinema_catalog::error::CatalogServiceError;
use cinema_catalog::infra::memory::MemoryStorage;
use cinema_catalog::usecase::actor::{
    CreateActorUseCase, DeleteActorUseCase, GetActorListUseCase, GetActorUseCase,
    UpdateActorUseCase,
};
use cinema_catalog::usecase::auth::{AuthenticateUseCase, CreateUserUseCase};
use cinema_catalog::usecase::movie::{
    CreateMovieUseCase, DeleteMovieUseCase, GetMovieListUseCase, GetMovieUseCase,
    SearchMoviesUseCase, UpdateMovieUseCase,
};
use cinema_domain::role::Role;
use cinema_testing::auth::TestAuth;

use crate::helpers::{new_actor, new_movie, seed_actor, seed_movie, test_db};

macro_rules! on_every_backend {
    ($scenario:ident) => {{
        $scenario(&MemoryStorage::new()).await;
        if let Some(db) = test_db().await {
            $scenario(&db.storage).await;
            db.drop_schema().await;
        }
    }};
}

fn names(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.name.as_str()).collect()
}

fn filmography_of(actor: &str, titles: &[&str]) -> BTreeMap<String, Vec<String>> {
    let titles = titles.iter().map(|t| (*t).to_owned()).collect();
    BTreeMap::from([(actor.to_owned(), titles)])
}

async fn get_movie<S: Storage>(storage: &S, id: Uuid) -> Movie {
    GetMovieUseCase {
        repo: storage.movies(),
    }
    .execute(&id.to_string())
    .await
    .unwrap()
}

async fn actor_list<S: Storage>(storage: &S) -> BTreeMap<String, Vec<String>> {
    GetActorListUseCase {
        repo: storage.actors(),
    }
    .execute()
    .await
    .unwrap()
}

// ── Credit linking ───────────────────────────────────────────────────────────

async fn back_fill_credit_when_actor_arrives<S: Storage>(storage: &S) {
    let movie = seed_movie(storage, "Closer", 7.2, &["Julia Roberts", "Jude Law"]).await;
    let credits = storage.movies().credits(movie.id).await.unwrap();
    assert!(credits.iter().all(|c| c.actor_id.is_none()));
    assert!(actor_list(storage).await.is_empty());

    let julia = seed_actor(storage, "Julia Roberts").await;
    let credits = storage.movies().credits(movie.id).await.unwrap();
    assert_eq!(credits[0].actor_id, Some(julia.id));
    assert_eq!(credits[1].actor_id, None);

    assert_eq!(
        actor_list(storage).await,
        filmography_of("Julia Roberts", &["Closer"])
    );
    assert_eq!(get_movie(storage, movie.id).await, movie);
}

#[tokio::test]
async fn should_back_fill_credit_when_actor_is_created_later() {
    on_every_backend!(back_fill_credit_when_actor_arrives);
}

async fn link_credit_at_movie_creation<S: Storage>(storage: &S) {
    let al = seed_actor(storage, "Al Pacino").await;
    let movie = seed_movie(storage, "Heat", 8.3, &["Al Pacino", "Val Kilmer"]).await;

    let credits = storage.movies().credits(movie.id).await.unwrap();
    assert_eq!(credits[0].actor_name, "Al Pacino");
    assert_eq!(credits[0].actor_id, Some(al.id));
    assert_eq!(credits[1].actor_name, "Val Kilmer");
    assert_eq!(credits[1].actor_id, None);
}

#[tokio::test]
async fn should_link_known_actor_when_movie_is_created() {
    on_every_backend!(link_credit_at_movie_creation);
}

async fn rename_actor_and_adopt_orphans<S: Storage>(storage: &S) {
    let jane = seed_actor(storage, "Jane").await;
    let first = seed_movie(storage, "First", 6.0, &["Jane"]).await;
    let second = seed_movie(storage, "Second", 7.0, &["Jane Doe"]).await;

    UpdateActorUseCase {
        repo: storage.actors(),
    }
    .execute(
        &jane.id.to_string(),
        ActorPatch {
            name: Some("Jane Doe".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    for id in [first.id, second.id] {
        let credits = storage.movies().credits(id).await.unwrap();
        assert_eq!(credits[0].actor_name, "Jane Doe");
        assert_eq!(credits[0].actor_id, Some(jane.id));
    }
    assert_eq!(
        actor_list(storage).await,
        filmography_of("Jane Doe", &["First", "Second"])
    );
    assert_eq!(
        get_movie(storage, first.id).await.actor_list,
        vec!["Jane Doe".to_owned()]
    );
}

#[tokio::test]
async fn should_rename_credits_and_link_orphans_on_actor_rename() {
    on_every_backend!(rename_actor_and_adopt_orphans);
}

async fn delete_actor_keeps_credit<S: Storage>(storage: &S) {
    let al = seed_actor(storage, "Al Pacino").await;
    let movie = seed_movie(storage, "Heat", 8.3, &["Al Pacino"]).await;

    let uc = DeleteActorUseCase {
        repo: storage.actors(),
    };
    uc.execute(&al.id.to_string()).await.unwrap();
    assert!(matches!(
        uc.execute(&al.id.to_string()).await,
        Err(CatalogServiceError::ActorNotFound)
    ));

    let credits = storage.movies().credits(movie.id).await.unwrap();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].actor_name, "Al Pacino");
    assert_eq!(credits[0].actor_id, None);
    assert!(actor_list(storage).await.is_empty());
    assert_eq!(get_movie(storage, movie.id).await, movie);
}

#[tokio::test]
async fn should_orphan_credit_when_actor_is_deleted() {
    on_every_backend!(delete_actor_keeps_credit);
}

// ── Movies ───────────────────────────────────────────────────────────────────

async fn delete_movie_drops_credits<S: Storage>(storage: &S) {
    seed_actor(storage, "Al Pacino").await;
    let movie = seed_movie(storage, "Heat", 8.3, &["Al Pacino"]).await;

    let uc = DeleteMovieUseCase {
        repo: storage.movies(),
    };
    uc.execute(&movie.id.to_string()).await.unwrap();

    assert!(storage.movies().credits(movie.id).await.unwrap().is_empty());
    assert!(storage.movies().find_by_id(movie.id).await.unwrap().is_none());
    assert!(actor_list(storage).await.is_empty());
    assert!(matches!(
        uc.execute(&movie.id.to_string()).await,
        Err(CatalogServiceError::MovieNotFound)
    ));
}

#[tokio::test]
async fn should_drop_credits_when_movie_is_deleted() {
    on_every_backend!(delete_movie_drops_credits);
}

async fn replace_cast_on_update<S: Storage>(storage: &S) {
    let gary = seed_actor(storage, "Gary Sinise").await;
    let movie = seed_movie(storage, "Forrest Gump", 8.8, &["Tom Hanks", "Robin Wright"]).await;

    let updated = UpdateMovieUseCase {
        repo: storage.movies(),
    }
    .execute(
        &movie.id.to_string(),
        MoviePatch {
            rating: Some(9.1),
            actor_list: Some(vec!["Sally Field".to_owned(), "Gary Sinise".to_owned()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let credits = storage.movies().credits(movie.id).await.unwrap();
    assert_eq!(credits.len(), 2);
    assert_eq!(credits[0].actor_name, "Sally Field");
    assert_eq!(credits[0].actor_id, None);
    assert_eq!(credits[1].actor_name, "Gary Sinise");
    assert_eq!(credits[1].actor_id, Some(gary.id));

    let loaded = get_movie(storage, movie.id).await;
    assert_eq!(loaded, updated);
    assert_eq!(loaded.rating, 9.1);
    assert_eq!(loaded.description, movie.description);
}

#[tokio::test]
async fn should_replace_cast_in_order_on_update() {
    on_every_backend!(replace_cast_on_update);
}

async fn list_in_stable_order<S: Storage>(storage: &S) {
    seed_movie(storage, "Brazil", 7.0, &[]).await;
    seed_movie(storage, "Casablanca", 7.0, &[]).await;
    seed_movie(storage, "Alien", 9.0, &[]).await;
    seed_movie(storage, "Dune", 7.0, &[]).await;

    let uc = GetMovieListUseCase {
        repo: storage.movies(),
    };
    let by_rating = uc.execute(None, None).await.unwrap();
    assert_eq!(by_rating[0].name, "Alien");
    let ties: Vec<Uuid> = by_rating[1..].iter().map(|m| m.id).collect();
    let mut sorted = ties.clone();
    sorted.sort();
    assert_eq!(ties, sorted);
    assert_eq!(uc.execute(None, None).await.unwrap(), by_rating);

    let by_name = uc.execute(Some("name"), Some("asc")).await.unwrap();
    assert_eq!(names(&by_name), vec!["Alien", "Brazil", "Casablanca", "Dune"]);

    let by_date = uc.execute(Some("release_date"), Some("desc")).await.unwrap();
    assert_eq!(by_date.len(), 4);
}

#[tokio::test]
async fn should_list_movies_in_stable_order() {
    on_every_backend!(list_in_stable_order);
}

async fn search_by_fragments<S: Storage>(storage: &S) {
    seed_movie(storage, "Forrest Gump", 8.8, &["Tom Hanks", "Julia Roberts"]).await;
    seed_movie(storage, "Cast Away", 7.8, &["Tom Hanks", "Helen Hunt"]).await;
    seed_movie(storage, "Heat", 8.3, &["Al Pacino"]).await;
    seed_movie(storage, "100% Arabica", 4.0, &[]).await;

    let uc = SearchMoviesUseCase {
        repo: storage.movies(),
    };
    let search = |title: &str, actor: &str| MovieSearch {
        title: title.to_owned(),
        actor: actor.to_owned(),
    };

    let found = uc.execute(search("", "Jul")).await.unwrap();
    assert_eq!(names(&found), vec!["Forrest Gump"]);
    assert_eq!(found[0].actor_list, vec!["Julia Roberts".to_owned()]);

    let found = uc.execute(search("a", "Tom")).await.unwrap();
    assert_eq!(names(&found), vec!["Cast Away"]);

    assert!(uc.execute(search("", "tom")).await.unwrap().is_empty());

    let found = uc.execute(search("%", "")).await.unwrap();
    assert_eq!(names(&found), vec!["100% Arabica"]);

    let found = uc.execute(MovieSearch::default()).await.unwrap();
    assert_eq!(
        names(&found),
        vec!["100% Arabica", "Cast Away", "Forrest Gump", "Heat"]
    );
    assert!(found[0].actor_list.is_empty());
    assert_eq!(found[2].actor_list.len(), 2);
}

#[tokio::test]
async fn should_search_by_title_and_actor_fragments() {
    on_every_backend!(search_by_fragments);
}

// ── Limits ───────────────────────────────────────────────────────────────────

async fn accept_long_actor_names<S: Storage>(storage: &S) {
    let long_name = "a".repeat(300);
    let actor = CreateActorUseCase {
        repo: storage.actors(),
    }
    .execute(new_actor(&long_name))
    .await
    .unwrap();
    let loaded = GetActorUseCase {
        repo: storage.actors(),
    }
    .execute(&actor.id.to_string())
    .await
    .unwrap();
    assert_eq!(loaded.name, long_name);

    let long_credit = "b".repeat(300);
    let movie = seed_movie(storage, "Ensemble", 6.5, &[long_name.as_str(), long_credit.as_str()]).await;
    assert_eq!(get_movie(storage, movie.id).await, movie);
    assert_eq!(
        actor_list(storage).await,
        filmography_of(long_name.as_str(), &["Ensemble"])
    );

    let result = CreateMovieUseCase {
        repo: storage.movies(),
    }
    .execute(new_movie(&"x".repeat(151), 5.0, &[]))
    .await;
    assert!(matches!(result, Err(CatalogServiceError::InvalidMovie(_))));
}

#[tokio::test]
async fn should_store_actor_names_longer_than_movie_names() {
    on_every_backend!(accept_long_actor_names);
}

async fn missing_rows_are_not_found<S: Storage>(storage: &S) {
    let id = Uuid::now_v7();
    assert!(storage.actors().find_by_id(id).await.unwrap().is_none());
    assert!(!storage.actors().delete(id).await.unwrap());
    assert!(!storage.movies().delete(id).await.unwrap());

    let result = UpdateActorUseCase {
        repo: storage.actors(),
    }
    .execute(&id.to_string(), ActorPatch::default())
    .await;
    assert!(matches!(result, Err(CatalogServiceError::ActorNotFound)));

    let result = UpdateMovieUseCase {
        repo: storage.movies(),
    }
    .execute(&id.to_string(), MoviePatch::default())
    .await;
    assert!(matches!(result, Err(CatalogServiceError::MovieNotFound)));
}

#[tokio::test]
async fn should_report_missing_rows_as_not_found() {
    on_every_backend!(missing_rows_are_not_found);
}

// ── Users ────────────────────────────────────────────────────────────────────

async fn store_and_authenticate_user<S: Storage>(storage: &S) {
    CreateUserUseCase {
        users: storage.users(),
    }
    .execute("editor@cinema.test", "popcorn", Role::Admin)
    .await
    .unwrap();

    let stored = storage
        .users()
        .find_by_email("editor@cinema.test")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.role, Role::Admin);
    assert_ne!(stored.password_hash, "popcorn");
    assert!(storage.users().find_by_email("nobody@cinema.test").await.unwrap().is_none());

    let auth = TestAuth::new();
    let uc = AuthenticateUseCase {
        users: storage.users(),
        tokens: auth.signer(),
    };
    assert!(uc.execute("editor@cinema.test", "popcorn").await.is_ok());
    assert!(matches!(
        uc.execute("editor@cinema.test", "butter").await,
        Err(CatalogServiceError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn should_store_and_authenticate_user() {
    on_every_backend!(store_and_authenticate_user);
}
