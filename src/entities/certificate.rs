//! `SeaORM` Entity for certificate table

use super::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "certificate"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub certificate_id: Uuid,
    pub scholar_id: Uuid,
    pub course_number: i32,
    pub file_name: String,
    pub file_url: String,
    pub upload_date: DateTime,
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<Uuid>,
    pub approval_date: Option<DateTime>,
    pub rejection_reason: String,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    CertificateId,
    ScholarId,
    CourseNumber,
    FileName,
    FileUrl,
    UploadDate,
    ApprovalStatus,
    ApprovedBy,
    ApprovalDate,
    RejectionReason,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    CertificateId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    PhdScholar,
    ApprovedBy,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::CertificateId => ColumnType::Uuid.def(),
            Self::ScholarId => ColumnType::Uuid.def(),
            Self::CourseNumber => ColumnType::Integer.def(),
            Self::FileName => ColumnType::String(StringLen::None).def(),
            Self::FileUrl => ColumnType::String(StringLen::None).def(),
            Self::UploadDate => ColumnType::DateTime.def(),
            Self::ApprovalStatus => ColumnType::String(StringLen::N(16u32)).def(),
            Self::ApprovedBy => ColumnType::Uuid.def().null(),
            Self::ApprovalDate => ColumnType::DateTime.def().null(),
            Self::RejectionReason => ColumnType::Text.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::PhdScholar => Entity::belongs_to(super::phd_scholar::Entity)
                .from(Column::ScholarId)
                .to(super::phd_scholar::Column::ScholarId)
                .into(),
            Self::ApprovedBy => Entity::belongs_to(super::user::Entity)
                .from(Column::ApprovedBy)
                .to(super::user::Column::UserId)
                .into(),
        }
    }
}

impl Related<super::phd_scholar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhdScholar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
