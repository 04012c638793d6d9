use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use super::dto::{StatisticsQuery, StatisticsResponse};
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::extractor::AuthClaims;
use crate::repositories::ScholarRepository;
use crate::repositories::scholar_repository::profile_of;
use crate::state::AppState;
use crate::statistics::{ScholarStatRecord, report_to_csv};

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/statistics", get(get_statistics))
        .route("/api/v1/admin/statistics/export", get(export_statistics))
}

async fn load_records(state: &AppState) -> AppResult<Vec<ScholarStatRecord>> {
    let scholars = ScholarRepository::new(&state.db).find_all().await?;
    let rules = &state.statistics_rules;

    let mut records = Vec::with_capacity(scholars.len());
    for model in scholars {
        let profile = match profile_of(&model) {
            Ok(profile) => profile,
            Err(e) => {
                // One unreadable record must not take the dashboard down
                tracing::warn!(scholar_id = %model.scholar_id, "Skipping scholar in statistics: {}", e);
                continue;
            }
        };
        records.push(rules.classify(
            model.scholar_id,
            profile.display_name(),
            &profile.admission_details.department,
            &profile.admission_details.mode_of_program,
        ));
    }
    Ok(records)
}

/// Enrollment by faculty bucket and program mode (administrator)
#[utoipa::path(
    get,
    path = "/api/v1/admin/statistics",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Faculty and mode statistics", body = StatisticsResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn get_statistics(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<(StatusCode, Json<StatisticsResponse>)> {
    claims.require_admin()?;

    let records = load_records(&state).await?;
    let report = state.statistics_rules.aggregate(&records);

    let (department_stats, raw_records) = match query.faculty.as_deref().map(str::trim) {
        Some(faculty) if !faculty.is_empty() => {
            let drill = state.statistics_rules.drill_down(&records, faculty);
            (Some(drill.department_stats), Some(drill.raw_records))
        }
        _ => (None, None),
    };

    Ok((
        StatusCode::OK,
        Json(StatisticsResponse {
            faculty_stats: report.faculty_stats,
            mode_stats: report.mode_stats,
            total: report.total,
            department_stats,
            raw_records,
        }),
    ))
}

/// Faculty table as CSV (administrator)
#[utoipa::path(
    get,
    path = "/api/v1/admin/statistics/export",
    responses(
        (status = 200, description = "CSV download", content_type = "text/csv", body = String),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Statistics"
)]
pub async fn export_statistics(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> AppResult<impl IntoResponse> {
    claims.require_admin()?;

    let records = load_records(&state).await?;
    let report = state.statistics_rules.aggregate(&records);
    let csv = report_to_csv(&report).map_err(AppError::PersistenceFailure)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"scholar-statistics.csv\"",
            ),
        ],
        csv,
    ))
}
