use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Actors::Uuid).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Actors::Name).text().not_null())
                    .col(
                        ColumnDef::new(Actors::Gender)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Actors::BirthDate).date().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actors_name")
                    .table(Actors::Table)
                    .col(Actors::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Actors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Actors {
    Table,
    Uuid,
    Name,
    Gender,
    BirthDate,
}
