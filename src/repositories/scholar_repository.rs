use crate::entities::{phd_scholar, user};
use crate::error::{AppError, AppResult};
use crate::repositories::user_repository::{UserRepository, UserUpdate};
use crate::scholar::{ScholarProfile, apply_patch};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde_json::Value;
use uuid::Uuid;

pub struct ScholarRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

/// Result of a scholar update. `user` is set when the name change was
/// propagated to the owning account.
pub struct ScholarUpdateOutcome {
    pub scholar: phd_scholar::Model,
    pub profile: ScholarProfile,
    pub user: Option<user::Model>,
}

pub fn profile_of(model: &phd_scholar::Model) -> AppResult<ScholarProfile> {
    serde_json::from_value(model.profile.clone()).map_err(|e| {
        AppError::PersistenceFailure(anyhow::anyhow!(
            "Stored scholar {} does not match the record shape: {}",
            model.scholar_id,
            e
        ))
    })
}

fn profile_document(profile: &ScholarProfile) -> AppResult<Value> {
    serde_json::to_value(profile).map_err(|e| AppError::PersistenceFailure(e.into()))
}

impl<'a, C: ConnectionTrait> ScholarRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, scholar_id: Uuid) -> AppResult<Option<phd_scholar::Model>> {
        let scholar = phd_scholar::Entity::find_by_id(scholar_id).one(self.db).await?;
        Ok(scholar)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<phd_scholar::Model>> {
        let scholar = phd_scholar::Entity::find()
            .filter(phd_scholar::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;
        Ok(scholar)
    }

    pub async fn find_all(&self) -> AppResult<Vec<phd_scholar::Model>> {
        let scholars = phd_scholar::Entity::find()
            .order_by_desc(phd_scholar::Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(scholars)
    }

    pub async fn create(
        &self,
        scholar_id: Uuid,
        user_id: Uuid,
        profile: &ScholarProfile,
    ) -> AppResult<phd_scholar::Model> {
        let now = Utc::now().naive_utc();
        let scholar_model = phd_scholar::ActiveModel {
            scholar_id: Set(scholar_id),
            user_id: Set(user_id),
            profile: Set(profile_document(profile)?),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = scholar_model.insert(self.db).await?;
        Ok(result)
    }

    async fn write_profile(
        &self,
        current: &phd_scholar::Model,
        profile: &ScholarProfile,
        expected_version: Option<i32>,
    ) -> AppResult<phd_scholar::Model> {
        let now = Utc::now().naive_utc();
        let document = profile_document(profile)?;

        let mut update = phd_scholar::Entity::update_many()
            .col_expr(phd_scholar::Column::Profile, Expr::value(document))
            .col_expr(phd_scholar::Column::Version, Expr::value(current.version + 1))
            .col_expr(phd_scholar::Column::UpdatedAt, Expr::value(now))
            .filter(phd_scholar::Column::ScholarId.eq(current.scholar_id));

        if let Some(version) = expected_version {
            update = update.filter(phd_scholar::Column::Version.eq(version));
        }

        let result = update.exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::conflict(
                "Scholar record was modified by someone else; reload and retry",
            ));
        }

        self.find_by_id(current.scholar_id)
            .await?
            .ok_or_else(|| AppError::not_found("Scholar not found"))
    }
}

impl ScholarRepository<'_, DatabaseConnection> {
    /// Merges `patch` into the stored aggregate. When the personal first or
    /// last name changes, the owning user's name is rewritten in the same
    /// transaction. Without `expected_version` the last write wins.
    pub async fn update_profile(
        &self,
        scholar_id: Uuid,
        patch: Value,
        expected_version: Option<i32>,
    ) -> AppResult<ScholarUpdateOutcome> {
        let txn = self.db.begin().await?;
        let scholars = ScholarRepository::new(&txn);

        let current = scholars
            .find_by_id(scholar_id)
            .await?
            .ok_or_else(|| AppError::not_found("Scholar not found"))?;

        if let Some(version) = expected_version {
            if version != current.version {
                return Err(AppError::conflict(format!(
                    "Scholar record is at version {}, update was based on version {}",
                    current.version, version
                )));
            }
        }

        let previous = profile_of(&current)?;
        let profile = apply_patch(&previous, patch)?;
        let scholar = scholars
            .write_profile(&current, &profile, expected_version)
            .await?;

        let user = if profile.name_changed_from(&previous) {
            let updates = UserUpdate {
                first_name: Some(profile.personal_details.first_name.clone()),
                last_name: Some(profile.personal_details.last_name.clone()),
                ..Default::default()
            };
            Some(UserRepository::new(&txn).update(current.user_id, updates).await?)
        } else {
            None
        };

        txn.commit().await?;

        tracing::info!(
            scholar_id = %scholar_id,
            version = scholar.version,
            name_synced = user.is_some(),
            "scholar record updated"
        );

        Ok(ScholarUpdateOutcome {
            scholar,
            profile,
            user,
        })
    }
}
