use axum::{Json, Router, extract::State, http::StatusCode, routing::{get, post}};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::dto::{
    ChangePasswordRequest, ChangePasswordResponse, LoginRequest, LoginResponse, LogoutResponse,
    SignupRequest, SignupResponse, UserResponse,
};
use crate::entities::user;
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::extractor::AuthClaims;
use crate::repositories::{NewUser, ScholarRepository, UserRepository, UserUpdate};
use crate::scholar::{ScholarProfile, apply_patch};
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/auth/change-password", post(change_password))
}

fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::PersistenceFailure(anyhow::anyhow!("Failed to hash password: {}", e)))
}

fn issue_session(state: &AppState, user: user::Model) -> AppResult<LoginResponse> {
    let (token, _) = state
        .jwt
        .create_jwt(&user)
        .map_err(|e| AppError::PersistenceFailure(anyhow::anyhow!("Failed to create token: {}", e)))?;

    Ok(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.ttl_seconds(),
        user: user.into(),
    })
}

/// Register a scholar account together with its scholar record
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account and scholar record created", body = SignupResponse),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let email = payload.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(AppError::validation("firstName and lastName are required"));
    }

    let mut profile = ScholarProfile::default();
    for patch in payload.profile_patch() {
        profile = apply_patch(&profile, patch)?;
    }

    if UserRepository::new(&state.db)
        .find_by_email(&email)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("Email is already registered"));
    }

    let hashed_password = hash_password(&payload.password, state.config.password_hash_cost)?;
    let user_id = Uuid::new_v4();
    let scholar_id = Uuid::new_v4();

    let txn = state.db.begin().await?;
    UserRepository::new(&txn)
        .create(NewUser {
            user_id,
            email: email.clone(),
            password: hashed_password,
            first_name: profile.personal_details.first_name.clone(),
            last_name: profile.personal_details.last_name.clone(),
            is_admin: false,
            is_supervisor: false,
            is_verified: false,
            scholar_id: Some(scholar_id),
        })
        .await?;
    ScholarRepository::new(&txn)
        .create(scholar_id, user_id, &profile)
        .await?;
    txn.commit().await?;

    tracing::info!(user_id = %user_id, scholar_id = %scholar_id, "scholar registered");

    Ok((
        StatusCode::OK,
        Json(SignupResponse {
            message: "Registration successful".to_string(),
            user_id,
            scholar_id,
        }),
    ))
}

/// Login endpoint - returns JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let user_info = UserRepository::new(&state.db)
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::unauthenticated("Invalid email or password"))?;

    let password_valid = bcrypt::verify(&payload.password, &user_info.password).unwrap_or(false);
    if !password_valid {
        return Err(AppError::unauthenticated("Invalid email or password"));
    }

    Ok((StatusCode::OK, Json(issue_session(&state, user_info)?)))
}

/// Logout endpoint - blacklist JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logout successful", body = LogoutResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn logout(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    AuthClaims(auth_claims): AuthClaims,
) -> AppResult<(StatusCode, Json<LogoutResponse>)> {
    state
        .blacklist
        .add_jwt_to_blacklist(&auth_claims.sub, bearer.token(), auth_claims.exp)
        .await?;

    Ok((
        StatusCode::OK,
        Json(LogoutResponse {
            message: "Logout successful".to_string(),
        }),
    ))
}

/// Reissue the session token with current role flags and a fresh expiry
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    responses(
        (status = 200, description = "New session token", body = LoginResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn refresh(
    State(state): State<AppState>,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
    AuthClaims(auth_claims): AuthClaims,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let user_info = UserRepository::new(&state.db)
        .find_by_id(auth_claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::unauthenticated("Account no longer exists"))?;

    let response = issue_session(&state, user_info)?;

    state
        .blacklist
        .add_jwt_to_blacklist(&auth_claims.sub, bearer.token(), auth_claims.exp)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

/// Current account
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn me(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user_info = UserRepository::new(&state.db)
        .find_by_id(auth_claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok((StatusCode::OK, Json(user_info.into())))
}

/// Change password endpoint
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ChangePasswordResponse),
        (status = 400, description = "Invalid new password", body = ErrorResponse),
        (status = 401, description = "Old password does not match", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn change_password(
    State(state): State<AppState>,
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<(StatusCode, Json<ChangePasswordResponse>)> {
    let user_repo = UserRepository::new(&state.db);
    let user_info = user_repo
        .find_by_id(auth_claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let old_valid = bcrypt::verify(&payload.old_password, &user_info.password).unwrap_or(false);
    if !old_valid {
        return Err(AppError::unauthenticated("Old password is incorrect"));
    }

    let hashed_password = hash_password(&payload.new_password, state.config.password_hash_cost)?;
    user_repo
        .update(
            user_info.user_id,
            UserUpdate {
                password: Some(hashed_password),
                ..Default::default()
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ChangePasswordResponse {
            message: "Password changed successfully".to_string(),
        }),
    ))
}
