use crate::entities::certificate;
use crate::entities::sea_orm_active_enums::ApprovalStatus;
use crate::error::{AppError, AppResult};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

pub struct CertificateRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

pub struct NewCertificate {
    pub certificate_id: Uuid,
    pub scholar_id: Uuid,
    pub course_number: i32,
    pub file_name: String,
    pub file_url: String,
}

#[derive(Debug, Default, Clone)]
pub struct CertificateFilter {
    pub scholar_id: Option<Uuid>,
    pub course_number: Option<i32>,
    pub status: Option<ApprovalStatus>,
}

/// A reviewer's verdict on a pending certificate.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewDecision {
    Approve,
    Reject { reason: String },
}

impl ReviewDecision {
    pub fn reject(reason: &str) -> AppResult<Self> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::validation(
                "A rejection reason is required when rejecting a certificate",
            ));
        }
        Ok(ReviewDecision::Reject {
            reason: reason.to_string(),
        })
    }

    fn target_status(&self) -> ApprovalStatus {
        match self {
            ReviewDecision::Approve => ApprovalStatus::Approved,
            ReviewDecision::Reject { .. } => ApprovalStatus::Rejected,
        }
    }
}

impl<'a, C: ConnectionTrait> CertificateRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, new_certificate: NewCertificate) -> AppResult<certificate::Model> {
        let now = Utc::now().naive_utc();
        let certificate_model = certificate::ActiveModel {
            certificate_id: Set(new_certificate.certificate_id),
            scholar_id: Set(new_certificate.scholar_id),
            course_number: Set(new_certificate.course_number),
            file_name: Set(new_certificate.file_name),
            file_url: Set(new_certificate.file_url),
            upload_date: Set(now),
            approval_status: Set(ApprovalStatus::Pending),
            approved_by: Set(None),
            approval_date: Set(None),
            rejection_reason: Set(String::new()),
            updated_at: Set(now),
        };

        let result = certificate_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn find_by_id(&self, certificate_id: Uuid) -> AppResult<Option<certificate::Model>> {
        let certificate = certificate::Entity::find_by_id(certificate_id)
            .one(self.db)
            .await?;
        Ok(certificate)
    }

    /// Newest upload first.
    pub async fn find_all(&self, filter: CertificateFilter) -> AppResult<Vec<certificate::Model>> {
        let mut query = certificate::Entity::find();

        if let Some(scholar_id) = filter.scholar_id {
            query = query.filter(certificate::Column::ScholarId.eq(scholar_id));
        }
        if let Some(course_number) = filter.course_number {
            query = query.filter(certificate::Column::CourseNumber.eq(course_number));
        }
        if let Some(status) = filter.status {
            query = query.filter(certificate::Column::ApprovalStatus.eq(status));
        }

        let certificates = query
            .order_by_desc(certificate::Column::UploadDate)
            .all(self.db)
            .await?;
        Ok(certificates)
    }

    /// Moves a pending certificate to approved or rejected. Approved and
    /// rejected are terminal; a second review is a conflict.
    pub async fn review(
        &self,
        certificate_id: Uuid,
        decision: ReviewDecision,
        reviewer_id: Uuid,
    ) -> AppResult<certificate::Model> {
        let current = self
            .find_by_id(certificate_id)
            .await?
            .ok_or_else(|| AppError::not_found("Certificate not found"))?;

        if current.approval_status.is_terminal() {
            return Err(AppError::conflict(format!(
                "Certificate has already been {}",
                current.approval_status.as_str()
            )));
        }

        let now = Utc::now().naive_utc();
        let reason = match &decision {
            ReviewDecision::Approve => String::new(),
            ReviewDecision::Reject { reason } => reason.clone(),
        };

        // Guarded on status so two concurrent reviews cannot both land
        let result = certificate::Entity::update_many()
            .col_expr(
                certificate::Column::ApprovalStatus,
                Expr::value(decision.target_status().as_str()),
            )
            .col_expr(certificate::Column::ApprovedBy, Expr::value(Some(reviewer_id)))
            .col_expr(certificate::Column::ApprovalDate, Expr::value(Some(now)))
            .col_expr(certificate::Column::RejectionReason, Expr::value(reason))
            .col_expr(certificate::Column::UpdatedAt, Expr::value(now))
            .filter(certificate::Column::CertificateId.eq(certificate_id))
            .filter(certificate::Column::ApprovalStatus.eq(ApprovalStatus::Pending))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::conflict("Certificate has already been reviewed"));
        }

        tracing::info!(
            certificate_id = %certificate_id,
            reviewer_id = %reviewer_id,
            status = decision.target_status().as_str(),
            "certificate reviewed"
        );

        self.find_by_id(certificate_id)
            .await?
            .ok_or_else(|| AppError::not_found("Certificate not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_requires_a_reason() {
        assert!(matches!(
            ReviewDecision::reject("   "),
            Err(AppError::ValidationFailed(_))
        ));
        assert_eq!(
            ReviewDecision::reject(" blurry scan ").unwrap(),
            ReviewDecision::Reject {
                reason: "blurry scan".to_string()
            }
        );
    }
}
