use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::sea_query::{Expr, LikeExpr, Query};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, Order, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use cinema_catalog_schema::{actors, movie_actors, movies, users};
use cinema_domain::role::Role;
use cinema_domain::sort::Sort;

use crate::domain::repository::{ActorRepository, MovieRepository, Storage, UserRepository};
use crate::domain::types::{
    Actor, Filmography, Movie, MovieCredit, MovieOrder, MovieSearch, MovieSortBy, User,
    like_contains,
};
use crate::error::CatalogServiceError;

// ── Storage ──────────────────────────────────────────────────────────────────

/// PostgreSQL storage through one shared connection pool.
#[derive(Clone)]
pub struct DbStorage {
    pub db: DatabaseConnection,
}

impl Storage for DbStorage {
    type Actors = DbActorRepository;
    type Movies = DbMovieRepository;
    type Users = DbUserRepository;

    fn actors(&self) -> DbActorRepository {
        DbActorRepository {
            db: self.db.clone(),
        }
    }

    fn movies(&self) -> DbMovieRepository {
        DbMovieRepository {
            db: self.db.clone(),
        }
    }

    fn users(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    async fn ping(&self) -> Result<(), CatalogServiceError> {
        self.db.ping().await.context("ping database")?;
        Ok(())
    }
}

// ── Actor repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActorRepository {
    pub db: DatabaseConnection,
}

impl ActorRepository for DbActorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Actor>, CatalogServiceError> {
        let model = actors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find actor by id")?;
        Ok(model.map(actor_from_model))
    }

    async fn create(&self, actor: &Actor) -> Result<(), CatalogServiceError> {
        let actor = actor.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    actors::ActiveModel {
                        uuid: Set(actor.id),
                        name: Set(actor.name.clone()),
                        gender: Set(actor.gender.clone()),
                        birth_date: Set(actor.birth_date),
                    }
                    .insert(txn)
                    .await?;
                    link_unlinked_credits(txn, actor.id, &actor.name).await?;
                    Ok(())
                })
            })
            .await
            .context("create actor")?;
        Ok(())
    }

    async fn update(&self, actor: &Actor) -> Result<bool, CatalogServiceError> {
        let actor = actor.clone();
        let updated = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let res = actors::Entity::update_many()
                        .col_expr(actors::Column::Name, Expr::value(actor.name.clone()))
                        .col_expr(actors::Column::Gender, Expr::value(actor.gender.clone()))
                        .col_expr(actors::Column::BirthDate, Expr::value(actor.birth_date))
                        .filter(actors::Column::Uuid.eq(actor.id))
                        .exec(txn)
                        .await?;
                    if res.rows_affected == 0 {
                        return Ok(false);
                    }

                    movie_actors::Entity::update_many()
                        .col_expr(
                            movie_actors::Column::ActorName,
                            Expr::value(actor.name.clone()),
                        )
                        .filter(movie_actors::Column::ActorUuid.eq(actor.id))
                        .exec(txn)
                        .await?;
                    link_unlinked_credits(txn, actor.id, &actor.name).await?;
                    Ok(true)
                })
            })
            .await
            .context("update actor")?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogServiceError> {
        // movie_actors.actor_uuid is ON DELETE SET NULL.
        let res = actors::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete actor")?;
        Ok(res.rows_affected > 0)
    }

    async fn filmography(&self) -> Result<Filmography, CatalogServiceError> {
        use sea_orm::{FromQueryResult, Statement};

        #[derive(Debug, FromQueryResult)]
        struct CreditRow {
            actor_name: String,
            movie_name: String,
        }

        let rows = CreditRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            r#"
            SELECT ma.actor_name AS actor_name, m.name AS movie_name
            FROM movie_actors ma
            JOIN actors a ON a.uuid = ma.actor_uuid
            JOIN movies m ON m.uuid = ma.movie_uuid
            ORDER BY ma.actor_name, m.name
            "#,
        ))
        .all(&self.db)
        .await
        .context("list actor filmography")?;

        let mut filmography = Filmography::new();
        for row in rows {
            filmography
                .entry(row.actor_name)
                .or_default()
                .push(row.movie_name);
        }
        Ok(filmography)
    }
}

/// Point credits named `name` that have no actor yet at `actor_id`.
async fn link_unlinked_credits(
    txn: &DatabaseTransaction,
    actor_id: Uuid,
    name: &str,
) -> Result<u64, DbErr> {
    let res = movie_actors::Entity::update_many()
        .col_expr(movie_actors::Column::ActorUuid, Expr::value(actor_id))
        .filter(movie_actors::Column::ActorName.eq(name))
        .filter(movie_actors::Column::ActorUuid.is_null())
        .exec(txn)
        .await?;
    Ok(res.rows_affected)
}

fn actor_from_model(model: actors::Model) -> Actor {
    Actor {
        id: model.uuid,
        name: model.name,
        gender: model.gender,
        birth_date: model.birth_date,
    }
}

// ── Movie repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMovieRepository {
    pub db: DatabaseConnection,
}

impl MovieRepository for DbMovieRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, CatalogServiceError> {
        let Some(model) = movies::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find movie by id")?
        else {
            return Ok(None);
        };
        let cast = self
            .credits(id)
            .await?
            .into_iter()
            .map(|c| c.actor_name)
            .collect();
        Ok(Some(movie_from_model(model, cast)))
    }

    async fn create(&self, movie: &Movie) -> Result<(), CatalogServiceError> {
        let movie = movie.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    movies::ActiveModel {
                        uuid: Set(movie.id),
                        name: Set(movie.name.clone()),
                        description: Set(movie.description.clone()),
                        release_date: Set(movie.release_date),
                        rating: Set(movie.rating),
                    }
                    .insert(txn)
                    .await?;
                    insert_credits(txn, movie.id, &movie.actor_list).await?;
                    Ok(())
                })
            })
            .await
            .context("create movie")?;
        Ok(())
    }

    async fn update(&self, movie: &Movie, replace_cast: bool) -> Result<bool, CatalogServiceError> {
        let movie = movie.clone();
        let updated = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let res = movies::Entity::update_many()
                        .col_expr(movies::Column::Name, Expr::value(movie.name.clone()))
                        .col_expr(
                            movies::Column::Description,
                            Expr::value(movie.description.clone()),
                        )
                        .col_expr(movies::Column::ReleaseDate, Expr::value(movie.release_date))
                        .col_expr(movies::Column::Rating, Expr::value(movie.rating))
                        .filter(movies::Column::Uuid.eq(movie.id))
                        .exec(txn)
                        .await?;
                    if res.rows_affected == 0 {
                        return Ok(false);
                    }

                    if replace_cast {
                        movie_actors::Entity::delete_many()
                            .filter(movie_actors::Column::MovieUuid.eq(movie.id))
                            .exec(txn)
                            .await?;
                        insert_credits(txn, movie.id, &movie.actor_list).await?;
                    }
                    Ok(true)
                })
            })
            .await
            .context("update movie")?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogServiceError> {
        // movie_actors.movie_uuid is ON DELETE CASCADE.
        let res = movies::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete movie")?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, order: MovieOrder) -> Result<Vec<Movie>, CatalogServiceError> {
        let column = match order.by {
            MovieSortBy::Name => movies::Column::Name,
            MovieSortBy::Description => movies::Column::Description,
            MovieSortBy::ReleaseDate => movies::Column::ReleaseDate,
            MovieSortBy::Rating => movies::Column::Rating,
        };
        let direction = match order.direction {
            Sort::Asc => Order::Asc,
            Sort::Desc => Order::Desc,
        };
        let models = movies::Entity::find()
            .order_by(column, direction)
            .order_by_asc(movies::Column::Uuid)
            .all(&self.db)
            .await
            .context("list movies")?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.uuid).collect();
        let mut casts = self.casts(&ids, None).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let cast = casts.remove(&m.uuid).unwrap_or_default();
                movie_from_model(m, cast)
            })
            .collect())
    }

    async fn search(&self, search: &MovieSearch) -> Result<Vec<Movie>, CatalogServiceError> {
        let mut query = movies::Entity::find()
            .filter(movies::Column::Name.like(like_expr(&search.title)));

        let actor_pattern = (!search.actor.is_empty()).then(|| search.actor.as_str());
        if let Some(fragment) = actor_pattern {
            query = query.filter(
                movies::Column::Uuid.in_subquery(
                    Query::select()
                        .column(movie_actors::Column::MovieUuid)
                        .from(movie_actors::Entity)
                        .and_where(movie_actors::Column::ActorName.like(like_expr(fragment)))
                        .to_owned(),
                ),
            );
        }

        let models = query
            .order_by_asc(movies::Column::Name)
            .order_by_asc(movies::Column::Uuid)
            .all(&self.db)
            .await
            .context("search movies")?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.uuid).collect();
        let mut casts = self.casts(&ids, actor_pattern).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let cast = casts.remove(&m.uuid).unwrap_or_default();
                movie_from_model(m, cast)
            })
            .collect())
    }

    async fn credits(&self, movie_id: Uuid) -> Result<Vec<MovieCredit>, CatalogServiceError> {
        let models = movie_actors::Entity::find()
            .filter(movie_actors::Column::MovieUuid.eq(movie_id))
            .order_by_asc(movie_actors::Column::Position)
            .all(&self.db)
            .await
            .context("list movie credits")?;
        Ok(models
            .into_iter()
            .map(|m| MovieCredit {
                actor_name: m.actor_name,
                actor_id: m.actor_uuid,
            })
            .collect())
    }
}

impl DbMovieRepository {
    /// Cast names per movie in list order, optionally restricted to names
    /// containing `actor_fragment`.
    async fn casts(
        &self,
        movie_ids: &[Uuid],
        actor_fragment: Option<&str>,
    ) -> Result<HashMap<Uuid, Vec<String>>, CatalogServiceError> {
        if movie_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut query = movie_actors::Entity::find()
            .filter(movie_actors::Column::MovieUuid.is_in(movie_ids.iter().copied()));
        if let Some(fragment) = actor_fragment {
            query = query.filter(movie_actors::Column::ActorName.like(like_expr(fragment)));
        }
        let rows = query
            .order_by_asc(movie_actors::Column::MovieUuid)
            .order_by_asc(movie_actors::Column::Position)
            .all(&self.db)
            .await
            .context("list credits for movies")?;

        let mut casts: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in rows {
            casts.entry(row.movie_uuid).or_default().push(row.actor_name);
        }
        Ok(casts)
    }
}

fn like_expr(fragment: &str) -> LikeExpr {
    LikeExpr::new(like_contains(fragment)).escape('\\')
}

/// One credit per name, in order. Each name resolves to the first actor
/// carrying it, or stays unlinked.
async fn insert_credits(
    txn: &DatabaseTransaction,
    movie_id: Uuid,
    names: &[String],
) -> Result<(), DbErr> {
    for (position, name) in names.iter().enumerate() {
        let actor_id = actors::Entity::find()
            .filter(actors::Column::Name.eq(name.as_str()))
            .order_by_asc(actors::Column::Uuid)
            .one(txn)
            .await?
            .map(|a| a.uuid);
        movie_actors::ActiveModel {
            movie_uuid: Set(movie_id),
            position: Set(position as i32),
            actor_name: Set(name.clone()),
            actor_uuid: Set(actor_id),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}

fn movie_from_model(model: movies::Model, actor_list: Vec<String>) -> Movie {
    Movie {
        id: model.uuid,
        name: model.name,
        description: model.description,
        release_date: model.release_date,
        rating: model.rating,
        actor_list,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogServiceError> {
        let model = users::Entity::find_by_id(email.to_owned())
            .one(&self.db)
            .await
            .context("find user by email")?;
        let Some(model) = model else {
            return Ok(None);
        };
        let role = model
            .role
            .parse::<Role>()
            .with_context(|| format!("decode role of user {}", model.email))?;
        Ok(Some(User {
            email: model.email,
            password_hash: model.password_hash,
            role,
        }))
    }

    async fn create(&self, user: &User) -> Result<(), CatalogServiceError> {
        users::ActiveModel {
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }
}
