use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde_json::Value;
use uuid::Uuid;

use super::dto::{
    ScholarListResponse, ScholarQueryParams, ScholarResponse, ScholarSummary,
    UpdateScholarRequest, UpdateScholarResponse,
};
use crate::entities::phd_scholar;
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::extractor::AuthClaims;
use crate::repositories::ScholarRepository;
use crate::repositories::scholar_repository::profile_of;
use crate::scholar::ScholarProfile;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/user/phd-scholar/{scholar_id}",
            get(get_scholar).put(update_scholar),
        )
        .route("/api/v1/admin/phd-scholars", get(get_all_scholars))
        .route("/api/v1/supervisor/phd-scholars", get(get_supervised_scholars))
}

fn matches_search(profile: &ScholarProfile, search: Option<&str>) -> bool {
    let Some(term) = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) else {
        return true;
    };
    [
        profile.display_name(),
        profile.admission_details.department.clone(),
        profile.admission_details.usn.clone(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

fn summarize(
    scholars: Vec<phd_scholar::Model>,
    keep: impl Fn(&ScholarProfile) -> bool,
) -> AppResult<ScholarListResponse> {
    let mut summaries = Vec::new();
    for model in scholars {
        let profile = profile_of(&model)?;
        if keep(&profile) {
            summaries.push(ScholarSummary::new(&model, &profile));
        }
    }
    Ok(ScholarListResponse {
        total: summaries.len(),
        scholars: summaries,
    })
}

/// Read one scholar record (owner, administrator or supervisor)
#[utoipa::path(
    get,
    path = "/api/v1/user/phd-scholar/{scholar_id}",
    params(("scholar_id" = Uuid, Path, description = "Scholar ID")),
    responses(
        (status = 200, description = "Scholar record", body = ScholarResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Scholar not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Scholars"
)]
pub async fn get_scholar(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(scholar_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ScholarResponse>)> {
    if !claims.owns_scholar(scholar_id) {
        claims.require_admin_or_supervisor()?;
    }

    let model = ScholarRepository::new(&state.db)
        .find_by_id(scholar_id)
        .await?
        .ok_or_else(|| AppError::not_found("Scholar not found"))?;
    let profile = profile_of(&model)?;

    Ok((StatusCode::OK, Json(ScholarResponse::new(model, profile))))
}

/// Update a scholar record (owner or administrator)
#[utoipa::path(
    put,
    path = "/api/v1/user/phd-scholar/{scholar_id}",
    params(("scholar_id" = Uuid, Path, description = "Scholar ID")),
    request_body = UpdateScholarRequest,
    responses(
        (status = 200, description = "Scholar record updated", body = UpdateScholarResponse),
        (status = 400, description = "Invalid record data", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Scholar not found", body = ErrorResponse),
        (status = 409, description = "Stale version", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Scholars"
)]
pub async fn update_scholar(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(scholar_id): Path<Uuid>,
    Json(payload): Json<UpdateScholarRequest>,
) -> AppResult<(StatusCode, Json<UpdateScholarResponse>)> {
    claims.require_scholar_owner(scholar_id)?;

    let mut changes = payload.changes;
    // Read-only envelope fields a client may echo back
    for key in ["scholarId", "userId", "createdAt", "updatedAt"] {
        changes.remove(key);
    }

    let outcome = ScholarRepository::new(&state.db)
        .update_profile(scholar_id, Value::Object(changes), payload.version)
        .await?;

    Ok((
        StatusCode::OK,
        Json(UpdateScholarResponse {
            message: "Scholar record updated".to_string(),
            scholar: ScholarResponse::new(outcome.scholar, outcome.profile),
            user: outcome.user.map(Into::into),
        }),
    ))
}

/// List every scholar (administrator)
#[utoipa::path(
    get,
    path = "/api/v1/admin/phd-scholars",
    params(ScholarQueryParams),
    responses(
        (status = 200, description = "Scholar list", body = ScholarListResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Scholars"
)]
pub async fn get_all_scholars(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Query(params): Query<ScholarQueryParams>,
) -> AppResult<(StatusCode, Json<ScholarListResponse>)> {
    claims.require_admin()?;

    let scholars = ScholarRepository::new(&state.db).find_all().await?;
    let response = summarize(scholars, |profile| {
        matches_search(profile, params.search.as_deref())
    })?;

    Ok((StatusCode::OK, Json(response)))
}

/// Scholars naming the caller as supervisor or co-supervisor
#[utoipa::path(
    get,
    path = "/api/v1/supervisor/phd-scholars",
    params(ScholarQueryParams),
    responses(
        (status = 200, description = "Supervised scholars", body = ScholarListResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Scholars"
)]
pub async fn get_supervised_scholars(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Query(params): Query<ScholarQueryParams>,
) -> AppResult<(StatusCode, Json<ScholarListResponse>)> {
    claims.require_admin_or_supervisor()?;

    let scholars = ScholarRepository::new(&state.db).find_all().await?;
    let response = summarize(scholars, |profile| {
        (claims.is_admin || profile.is_supervised_by(&claims.name))
            && matches_search(profile, params.search.as_deref())
    })?;

    Ok((StatusCode::OK, Json(response)))
}
