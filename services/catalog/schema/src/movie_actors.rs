use sea_orm::entity::prelude::*;

/// One credit in a movie's cast.
///
/// `actor_name` is always stored; `actor_uuid` is filled once an actor with
/// that name exists and cleared when the actor is deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movie_actors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub movie_uuid: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub position: i32,
    #[sea_orm(column_type = "Text")]
    pub actor_name: String,
    pub actor_uuid: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movies::Entity",
        from = "Column::MovieUuid",
        to = "super::movies::Column::Uuid",
        on_delete = "Cascade"
    )]
    Movie,
    #[sea_orm(
        belongs_to = "super::actors::Entity",
        from = "Column::ActorUuid",
        to = "super::actors::Column::Uuid",
        on_delete = "SetNull"
    )]
    Actor,
}

impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Related<super::actors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
