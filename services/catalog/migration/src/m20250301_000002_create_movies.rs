use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Movies::Uuid).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Movies::Name).string_len(150).not_null())
                    .col(
                        ColumnDef::new(Movies::Description)
                            .string_len(1000)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Movies::ReleaseDate).date().null())
                    .col(
                        ColumnDef::new(Movies::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .check(
                        Expr::col(Movies::Rating)
                            .gte(0.0)
                            .and(Expr::col(Movies::Rating).lte(10.0)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_name")
                    .table(Movies::Table)
                    .col(Movies::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Movies {
    Table,
    Uuid,
    Name,
    Description,
    ReleaseDate,
    Rating,
}
