use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture: Option<String>,
    /// bcrypt hash, never serialized out
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime,
    pub last_login: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::event::entity::event::Entity")]
    Event,
    #[sea_orm(has_many = "crate::domain::event::entity::event_like::Entity")]
    EventLike,
    #[sea_orm(has_many = "super::activation_token::Entity")]
    ActivationToken,
    #[sea_orm(has_many = "super::password_reset_token::Entity")]
    PasswordResetToken,
}

impl Related<crate::domain::event::entity::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<crate::domain::event::entity::event_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventLike.def()
    }
}

impl Related<super::activation_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivationToken.def()
    }
}

impl Related<super::password_reset_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PasswordResetToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
