//! `SeaORM` Entity prelude

pub use super::certificate::Entity as Certificate;
pub use super::discussion::Entity as Discussion;
pub use super::event::Entity as Event;
pub use super::meeting::Entity as Meeting;
pub use super::phd_scholar::Entity as PhdScholar;
pub use super::user::Entity as User;
