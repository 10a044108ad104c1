use sea_orm::entity::prelude::*;

/// A performer. `name` is not unique; movie credits resolve to the first match.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub gender: String,
    pub birth_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_actors::Entity")]
    MovieActors,
}

impl Related<super::movie_actors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieActors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
