use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use super::dto::{
    CertificateListResponse, CertificateQueryParams, CertificateResponse,
    ReviewAction, ReviewCertificateRequest, ScholarCertificateQuery, UploadCertificateForm,
};
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::extractor::AuthClaims;
use crate::repositories::{
    CertificateFilter, CertificateRepository, NewCertificate, ReviewDecision, ScholarRepository,
};
use crate::state::AppState;
use crate::utils::upload::{
    remove_stored_file, save_certificate_file, validate_course_number, validate_pdf,
};

/// Slack for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_route(max_certificate_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/user/phd-scholar/course-certificate",
            post(upload_certificate).get(get_scholar_certificates),
        )
        .route(
            "/api/v1/user/phd-scholar/course-certificate/approve",
            put(review_certificate),
        )
        .route("/api/v1/admin/certificates", get(get_all_certificates))
        .layer(DefaultBodyLimit::max(max_certificate_bytes + MULTIPART_OVERHEAD))
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

fn list_response(certificates: Vec<crate::entities::certificate::Model>) -> CertificateListResponse {
    let certificates: Vec<CertificateResponse> =
        certificates.into_iter().map(Into::into).collect();
    CertificateListResponse {
        total: certificates.len(),
        certificates,
    }
}

/// Upload a coursework certificate (PDF)
#[utoipa::path(
    post,
    path = "/api/v1/user/phd-scholar/course-certificate",
    request_body(content = UploadCertificateForm, content_type = "multipart/form-data", description = "Fields: phdId, courseNumber (1-4), file (PDF)"),
    responses(
        (status = 201, description = "Certificate stored, pending review", body = CertificateResponse),
        (status = 400, description = "Missing field, wrong file type or file too large", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Scholar not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn upload_certificate(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<CertificateResponse>)> {
    let mut phd_id: Option<String> = None;
    let mut course_number: Option<String> = None;
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "phdId" => {
                phd_id = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Failed to read phdId field: {}", e))
                })?);
            }
            "courseNumber" => {
                course_number = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Failed to read courseNumber field: {}", e))
                })?);
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read file field: {}", e))
                })?;
                upload = Some(UploadedFile {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    let scholar_id = phd_id
        .ok_or_else(|| AppError::validation("phdId is required"))
        .and_then(|raw| {
            Uuid::parse_str(raw.trim()).map_err(|_| AppError::validation("phdId is not a valid id"))
        })?;
    let course_number = course_number
        .ok_or_else(|| AppError::validation("courseNumber is required"))
        .and_then(|raw| {
            raw.trim()
                .parse::<i32>()
                .map_err(|_| AppError::validation("courseNumber must be a number"))
        })?;
    validate_course_number(course_number)?;
    let upload = upload.ok_or_else(|| AppError::validation("file is required"))?;

    claims.require_scholar_owner(scholar_id)?;

    ScholarRepository::new(&state.db)
        .find_by_id(scholar_id)
        .await?
        .ok_or_else(|| AppError::not_found("Scholar not found"))?;

    validate_pdf(
        upload.content_type.as_deref(),
        &upload.file_name,
        &upload.data,
        state.config.max_certificate_bytes,
    )?;

    let stored = save_certificate_file(
        &state.config.upload_dir,
        scholar_id,
        course_number,
        &upload.file_name,
        &upload.data,
    )
    .await?;

    let created = CertificateRepository::new(&state.db)
        .create(NewCertificate {
            certificate_id: Uuid::new_v4(),
            scholar_id,
            course_number,
            file_name: stored.file_name.clone(),
            file_url: stored.url.clone(),
        })
        .await;

    let certificate = match created {
        Ok(certificate) => certificate,
        Err(e) => {
            remove_stored_file(&stored).await;
            return Err(e);
        }
    };

    tracing::info!(
        certificate_id = %certificate.certificate_id,
        scholar_id = %scholar_id,
        course_number,
        bytes = upload.data.len(),
        "certificate uploaded"
    );

    Ok((StatusCode::CREATED, Json(certificate.into())))
}

/// Certificates of one scholar, optionally for one course slot
#[utoipa::path(
    get,
    path = "/api/v1/user/phd-scholar/course-certificate",
    params(ScholarCertificateQuery),
    responses(
        (status = 200, description = "Certificates, newest first", body = CertificateListResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn get_scholar_certificates(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Query(query): Query<ScholarCertificateQuery>,
) -> AppResult<(StatusCode, Json<CertificateListResponse>)> {
    if !claims.owns_scholar(query.phd_id) {
        claims.require_admin_or_supervisor()?;
    }

    let certificates = CertificateRepository::new(&state.db)
        .find_all(CertificateFilter {
            scholar_id: Some(query.phd_id),
            course_number: query.course_number,
            status: None,
        })
        .await?;

    Ok((StatusCode::OK, Json(list_response(certificates))))
}

/// Approve or reject a pending certificate (administrator)
#[utoipa::path(
    put,
    path = "/api/v1/user/phd-scholar/course-certificate/approve",
    request_body = ReviewCertificateRequest,
    responses(
        (status = 200, description = "Certificate reviewed", body = CertificateResponse),
        (status = 400, description = "Rejection without a reason", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Certificate not found", body = ErrorResponse),
        (status = 409, description = "Certificate already approved or rejected", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn review_certificate(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<ReviewCertificateRequest>,
) -> AppResult<(StatusCode, Json<CertificateResponse>)> {
    claims.require_admin()?;

    let decision = match payload.action {
        ReviewAction::Approve => ReviewDecision::Approve,
        ReviewAction::Reject => {
            ReviewDecision::reject(payload.rejection_reason.as_deref().unwrap_or_default())?
        }
    };

    let certificate = CertificateRepository::new(&state.db)
        .review(payload.certificate_id, decision, claims.user_id()?)
        .await?;

    Ok((StatusCode::OK, Json(certificate.into())))
}

/// Filterable certificate list (administrator)
#[utoipa::path(
    get,
    path = "/api/v1/admin/certificates",
    params(CertificateQueryParams),
    responses(
        (status = 200, description = "Certificates, newest first", body = CertificateListResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Certificates"
)]
pub async fn get_all_certificates(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Query(query): Query<CertificateQueryParams>,
) -> AppResult<(StatusCode, Json<CertificateListResponse>)> {
    claims.require_admin()?;

    let certificates = CertificateRepository::new(&state.db)
        .find_all(CertificateFilter {
            scholar_id: query.phd_id,
            course_number: query.course_number,
            status: query.status,
        })
        .await?;

    Ok((StatusCode::OK, Json(list_response(certificates))))
}
