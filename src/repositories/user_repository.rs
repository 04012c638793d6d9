use crate::entities::user;
use crate::error::{AppError, AppResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

pub struct UserRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

pub struct NewUser {
    pub user_id: Uuid,
    pub email: String,
    /// Already hashed
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub is_supervisor: bool,
    pub is_verified: bool,
    pub scholar_id: Option<Uuid>,
}

#[derive(Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
    pub is_supervisor: Option<bool>,
    pub is_verified: Option<bool>,
}

pub(crate) fn map_unique_violation(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(message),
        _ => err.into(),
    }
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<user::Model>> {
        let user = user::Entity::find_by_id(user_id).one(self.db).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db)
            .await?;
        Ok(user)
    }

    pub async fn find_all(&self, search: Option<&str>) -> AppResult<Vec<user::Model>> {
        let mut query = user::Entity::find();

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                user::Column::FirstName
                    .contains(term)
                    .or(user::Column::LastName.contains(term))
                    .or(user::Column::Email.contains(term)),
            );
        }

        let users = query
            .order_by_desc(user::Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(users)
    }

    pub async fn create(&self, new_user: NewUser) -> AppResult<user::Model> {
        let now = Utc::now().naive_utc();
        let user_model = user::ActiveModel {
            user_id: Set(new_user.user_id),
            email: Set(new_user.email.trim().to_lowercase()),
            password: Set(new_user.password),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            is_admin: Set(new_user.is_admin),
            is_supervisor: Set(new_user.is_supervisor),
            is_verified: Set(new_user.is_verified),
            scholar_id: Set(new_user.scholar_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user_model
            .insert(self.db)
            .await
            .map_err(|e| map_unique_violation(e, "Email is already registered"))
    }

    pub async fn update(&self, user_id: Uuid, updates: UserUpdate) -> AppResult<user::Model> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let mut active_user: user::ActiveModel = user.into();

        if let Some(first_name) = updates.first_name {
            active_user.first_name = Set(first_name);
        }
        if let Some(last_name) = updates.last_name {
            active_user.last_name = Set(last_name);
        }
        if let Some(password) = updates.password {
            active_user.password = Set(password);
        }
        if let Some(is_admin) = updates.is_admin {
            active_user.is_admin = Set(is_admin);
        }
        if let Some(is_supervisor) = updates.is_supervisor {
            active_user.is_supervisor = Set(is_supervisor);
        }
        if let Some(is_verified) = updates.is_verified {
            active_user.is_verified = Set(is_verified);
        }

        active_user.updated_at = Set(Utc::now().naive_utc());

        let result = active_user.update(self.db).await?;
        Ok(result)
    }
}
