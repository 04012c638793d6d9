use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;

use super::dto::{UpdateRolesRequest, UserListResponse, UserQueryParams};
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::extractor::AuthClaims;
use crate::repositories::{UserRepository, UserUpdate};
use crate::routes::auth::dto::UserResponse;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/users", get(get_all_users))
        .route("/api/v1/admin/users/{user_id}/roles", put(update_roles))
}

/// List accounts (administrator)
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(UserQueryParams),
    responses(
        (status = 200, description = "Accounts, newest first", body = UserListResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_all_users(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Query(params): Query<UserQueryParams>,
) -> AppResult<(StatusCode, Json<UserListResponse>)> {
    claims.require_admin()?;

    let users: Vec<UserResponse> = UserRepository::new(&state.db)
        .find_all(params.search.as_deref())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((
        StatusCode::OK,
        Json(UserListResponse {
            total: users.len(),
            users,
        }),
    ))
}

/// Grant or revoke role flags (administrator)
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{user_id}/roles",
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = UpdateRolesRequest,
    responses(
        (status = 200, description = "Roles updated", body = UserResponse),
        (status = 400, description = "Administrators cannot remove their own admin flag", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_roles(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateRolesRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    claims.require_admin()?;

    if user_id == claims.user_id()? && payload.is_admin == Some(false) {
        return Err(AppError::validation(
            "Administrators cannot remove their own admin flag",
        ));
    }

    let user = UserRepository::new(&state.db)
        .update(
            user_id,
            UserUpdate {
                is_admin: payload.is_admin,
                is_supervisor: payload.is_supervisor,
                is_verified: payload.is_verified,
                ..Default::default()
            },
        )
        .await?;

    tracing::info!(
        user_id = %user_id,
        changed_by = %claims.sub,
        is_admin = user.is_admin,
        is_supervisor = user.is_supervisor,
        "user roles updated"
    );

    Ok((StatusCode::OK, Json(user.into())))
}
