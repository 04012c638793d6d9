//! `SeaORM` Entities

pub mod prelude;

pub mod certificate;
pub mod discussion;
pub mod event;
pub mod meeting;
pub mod phd_scholar;
pub mod sea_orm_active_enums;
pub mod user;
