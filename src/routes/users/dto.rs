use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::routes::auth::dto::UserResponse;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQueryParams {
    /// Matches first name, last name or email
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

/// Flags left out are unchanged.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolesRequest {
    pub is_admin: Option<bool>,
    pub is_supervisor: Option<bool>,
    pub is_verified: Option<bool>,
}
