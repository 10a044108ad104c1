use axum_test::TestServer;
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use cinema_catalog::domain::repository::Storage;
use cinema_catalog::domain::types::{Actor, Movie, NewActor, NewMovie};
use cinema_catalog::infra::db::DbStorage;
use cinema_catalog::infra::memory::MemoryStorage;
use cinema_catalog::router::build_router;
use cinema_catalog::state::AppState;
use cinema_catalog::usecase::actor::CreateActorUseCase;
use cinema_catalog::usecase::movie::CreateMovieUseCase;
use cinema_catalog_migration::Migrator;
use cinema_testing::auth::TestAuth;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn new_actor(name: &str) -> NewActor {
    NewActor {
        name: name.to_owned(),
        gender: "female".to_owned(),
        birth_date: NaiveDate::from_ymd_opt(1967, 10, 28),
    }
}

pub fn new_movie(name: &str, rating: f64, cast: &[&str]) -> NewMovie {
    NewMovie {
        name: name.to_owned(),
        description: format!("{name} description"),
        release_date: NaiveDate::from_ymd_opt(1994, 7, 6),
        rating,
        actor_list: cast.iter().map(|s| (*s).to_owned()).collect(),
    }
}

pub async fn seed_actor<S: Storage>(storage: &S, name: &str) -> Actor {
    CreateActorUseCase {
        repo: storage.actors(),
    }
    .execute(new_actor(name))
    .await
    .unwrap()
}

pub async fn seed_movie<S: Storage>(storage: &S, name: &str, rating: f64, cast: &[&str]) -> Movie {
    CreateMovieUseCase {
        repo: storage.movies(),
    }
    .execute(new_movie(name, rating, cast))
    .await
    .unwrap()
}

// ── HTTP ─────────────────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
    pub auth: TestAuth,
}

pub fn test_app() -> TestApp {
    let storage = MemoryStorage::new();
    let auth = TestAuth::new();
    let router = build_router(AppState {
        storage: storage.clone(),
        tokens: auth.signer(),
    });
    TestApp {
        server: TestServer::new(router).unwrap(),
        storage,
        auth,
    }
}

// ── PostgreSQL ───────────────────────────────────────────────────────────────

const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

/// A migrated schema of its own on the server named by `TEST_DATABASE_URL`.
pub struct TestDb {
    pub storage: DbStorage,
    admin: DatabaseConnection,
    schema: String,
}

/// `None` when `TEST_DATABASE_URL` is unset.
pub async fn test_db() -> Option<TestDb> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL) else {
        eprintln!("{TEST_DATABASE_URL} not set, skipping the PostgreSQL run");
        return None;
    };
    let schema = format!("catalog_test_{}", Uuid::new_v4().simple());

    let admin = Database::connect(url.as_str()).await.unwrap();
    admin
        .execute_unprepared(&format!(r#"CREATE SCHEMA "{schema}""#))
        .await
        .unwrap();

    let mut options = ConnectOptions::new(url);
    options
        .set_schema_search_path(schema.clone())
        .max_connections(4)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    Some(TestDb {
        storage: DbStorage { db },
        admin,
        schema,
    })
}

impl TestDb {
    pub async fn drop_schema(self) {
        drop(self.storage);
        self.admin
            .execute_unprepared(&format!(r#"DROP SCHEMA "{}" CASCADE"#, self.schema))
            .await
            .unwrap();
    }
}
