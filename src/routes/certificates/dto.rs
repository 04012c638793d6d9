use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::certificate;
use crate::entities::sea_orm_active_enums::ApprovalStatus;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    pub certificate_id: Uuid,
    pub scholar_id: Uuid,
    #[schema(example = 1)]
    pub course_number: i32,
    #[schema(example = "grade_card.pdf")]
    pub file_name: String,
    pub file_url: String,
    pub upload_date: String,
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<Uuid>,
    pub approval_date: Option<String>,
    pub rejection_reason: String,
}

impl From<certificate::Model> for CertificateResponse {
    fn from(model: certificate::Model) -> Self {
        Self {
            certificate_id: model.certificate_id,
            scholar_id: model.scholar_id,
            course_number: model.course_number,
            file_name: model.file_name,
            file_url: model.file_url,
            upload_date: model.upload_date.to_string(),
            approval_status: model.approval_status,
            approved_by: model.approved_by,
            approval_date: model.approval_date.map(|d| d.to_string()),
            rejection_reason: model.rejection_reason,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CertificateListResponse {
    pub certificates: Vec<CertificateResponse>,
    pub total: usize,
}

/// Multipart form of a certificate upload.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UploadCertificateForm {
    #[schema(value_type = String, format = Uuid)]
    pub phd_id: String,
    #[schema(example = "1")]
    pub course_number: String,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ScholarCertificateQuery {
    pub phd_id: Uuid,
    pub course_number: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CertificateQueryParams {
    pub phd_id: Option<Uuid>,
    pub course_number: Option<i32>,
    pub status: Option<ApprovalStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCertificateRequest {
    pub certificate_id: Uuid,
    pub action: ReviewAction,
    /// Required when rejecting
    #[serde(default)]
    pub rejection_reason: Option<String>,
}
