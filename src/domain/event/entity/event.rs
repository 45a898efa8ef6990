use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub event_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub city: String,
    pub date: DateTime,
    pub created_by: i64,
    /// "online" or "in_person"; matched case-insensitively in filters
    pub event_mode: String,
    pub image: Option<String>,
    pub event_category: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    /// Sum of booking quantities; bumped only by atomic increments
    pub number_of_bookings: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::CreatedBy",
        to = "crate::domain::user::entity::user::Column::UserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(has_many = "super::event_like::Entity")]
    EventLike,
    #[sea_orm(has_many = "crate::domain::booking::entity::event_booking::Entity")]
    EventBooking,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::event_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventLike.def()
    }
}

impl Related<crate::domain::booking::entity::event_booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventBooking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
