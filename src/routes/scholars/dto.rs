use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entities::phd_scholar;
use crate::routes::auth::dto::UserResponse;
use crate::scholar::ScholarProfile;

/// Partial or full scholar record. Any subset of the record's keys may be
/// sent; nested objects are merged and `null` resets a field.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScholarRequest {
    /// Version the edit was based on. A stale version is rejected with 409.
    pub version: Option<i32>,
    #[serde(flatten)]
    #[schema(value_type = HashMap<String, Object>)]
    pub changes: serde_json::Map<String, Value>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScholarResponse {
    pub scholar_id: Uuid,
    pub user_id: Uuid,
    pub version: i32,
    #[serde(flatten)]
    pub profile: ScholarProfile,
    pub created_at: String,
    pub updated_at: String,
}

impl ScholarResponse {
    pub fn new(model: phd_scholar::Model, profile: ScholarProfile) -> Self {
        Self {
            scholar_id: model.scholar_id,
            user_id: model.user_id,
            version: model.version,
            profile,
            created_at: model.created_at.to_string(),
            updated_at: model.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScholarResponse {
    pub message: String,
    pub scholar: ScholarResponse,
    /// Present when the account name was updated along with the record.
    pub user: Option<UserResponse>,
}

/// Row of the scholar tables shown to administrators and supervisors.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScholarSummary {
    pub scholar_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub department: String,
    pub mode_of_program: String,
    pub usn: String,
    pub research_supervisor: String,
    pub research_co_supervisor: String,
    pub updated_at: String,
}

impl ScholarSummary {
    pub fn new(model: &phd_scholar::Model, profile: &ScholarProfile) -> Self {
        Self {
            scholar_id: model.scholar_id,
            user_id: model.user_id,
            name: profile.display_name(),
            department: profile.admission_details.department.clone(),
            mode_of_program: profile.admission_details.mode_of_program.clone(),
            usn: profile.admission_details.usn.clone(),
            research_supervisor: profile.research_supervisor.clone(),
            research_co_supervisor: profile.research_co_supervisor.clone(),
            updated_at: model.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScholarListResponse {
    pub scholars: Vec<ScholarSummary>,
    pub total: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScholarQueryParams {
    /// Case-insensitive match against name, department or USN
    pub search: Option<String>,
}
