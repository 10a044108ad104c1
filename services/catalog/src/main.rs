use std::net::SocketAddr;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use cinema_auth_types::token::JwtSigner;
use cinema_catalog::config::CatalogConfig;
use cinema_catalog::domain::repository::Storage;
use cinema_catalog::infra::db::DbStorage;
use cinema_catalog::router::build_router;
use cinema_catalog::state::AppState;
use cinema_catalog::usecase::auth::CreateUserUseCase;
use cinema_catalog_migration::Migrator;
use cinema_core::config::Config;
use cinema_core::tracing::init_tracing;
use cinema_domain::role::Role;

#[derive(Parser)]
#[command(name = "catalog", about = "Movie and actor catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Create a login account.
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "user")]
        role: Role,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = CatalogConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None).await.context("run migrations")?;
        info!("migrations applied");
    }

    let storage = DbStorage { db };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, storage).await,
        Command::CreateUser {
            email,
            password,
            role,
        } => {
            let uc = CreateUserUseCase {
                users: storage.users(),
            };
            uc.execute(&email, &password, role)
                .await
                .context("create user")?;
            info!(%email, %role, "user created");
            Ok(())
        }
    }
}

async fn serve(config: CatalogConfig, storage: DbStorage) -> anyhow::Result<()> {
    let state = AppState {
        storage,
        tokens: JwtSigner::new(&config.jwt_secret, config.token_ttl_secs),
    };

    let router = build_router(state);
    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.catalog_port));
    let listener = tokio::net::TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("catalog service listening on {http_addr}");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("serve http")?;
    Ok(())
}
