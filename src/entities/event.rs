//! `SeaORM` Entity for event table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "event"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: Date,
    pub event_time: String,
    pub location: String,
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub comments: Value,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    EventId,
    Title,
    Description,
    EventDate,
    EventTime,
    Location,
    OrganizerId,
    OrganizerName,
    Comments,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    EventId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Organizer,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::EventId => ColumnType::Uuid.def(),
            Self::Title => ColumnType::String(StringLen::None).def(),
            Self::Description => ColumnType::Text.def(),
            Self::EventDate => ColumnType::Date.def(),
            Self::EventTime => ColumnType::String(StringLen::N(8u32)).def(),
            Self::Location => ColumnType::String(StringLen::None).def(),
            Self::OrganizerId => ColumnType::Uuid.def(),
            Self::OrganizerName => ColumnType::String(StringLen::None).def(),
            Self::Comments => ColumnType::JsonBinary.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Organizer => Entity::belongs_to(super::user::Entity)
                .from(Column::OrganizerId)
                .to(super::user::Column::UserId)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
