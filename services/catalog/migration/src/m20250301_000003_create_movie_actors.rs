use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MovieActors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MovieActors::MovieUuid).uuid().not_null())
                    .col(ColumnDef::new(MovieActors::Position).integer().not_null())
                    .col(ColumnDef::new(MovieActors::ActorName).text().not_null())
                    .col(ColumnDef::new(MovieActors::ActorUuid).uuid().null())
                    .primary_key(
                        Index::create()
                            .col(MovieActors::MovieUuid)
                            .col(MovieActors::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MovieActors::Table, MovieActors::MovieUuid)
                            .to(Movies::Table, Movies::Uuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MovieActors::Table, MovieActors::ActorUuid)
                            .to(Actors::Table, Actors::Uuid)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Back-fill and search both look credits up by name.
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_actors_actor_name")
                    .table(MovieActors::Table)
                    .col(MovieActors::ActorName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_actors_actor_uuid")
                    .table(MovieActors::Table)
                    .col(MovieActors::ActorUuid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MovieActors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MovieActors {
    Table,
    MovieUuid,
    Position,
    ActorName,
    ActorUuid,
}

#[derive(Iden)]
enum Movies {
    Table,
    Uuid,
}

#[derive(Iden)]
enum Actors {
    Table,
    Uuid,
}
