use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A ticket reservation. Created once, never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub booking_id: i64,
    pub event_id: i64,
    pub name: String,
    pub email: String,
    pub quantity: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::event::entity::event::Entity",
        from = "Column::EventId",
        to = "crate::domain::event::entity::event::Column::EventId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Event,
}

impl Related<crate::domain::event::entity::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
