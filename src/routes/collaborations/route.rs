use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::dto::{
    CreateDiscussionRequest, CreateScheduledItemRequest, DiscussionResponse,
    ScheduledItemResponse, ThreadEntryRequest,
};
use crate::error::{AppResult, ErrorResponse};
use crate::extractor::AuthClaims;
use crate::repositories::{Author, CollaborationRepository};
use crate::state::AppState;
use crate::utils::jwt::TokenClaims;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/collaborations/discussions",
            get(get_discussions).post(create_discussion),
        )
        .route(
            "/api/v1/collaborations/discussions/{discussion_id}",
            get(get_discussion),
        )
        .route(
            "/api/v1/collaborations/discussions/{discussion_id}/reply",
            post(reply_to_discussion),
        )
        .route(
            "/api/v1/collaborations/meetings",
            get(get_meetings).post(create_meeting),
        )
        .route("/api/v1/collaborations/meetings/{meeting_id}", get(get_meeting))
        .route(
            "/api/v1/collaborations/meetings/{meeting_id}/comment",
            post(comment_on_meeting),
        )
        .route(
            "/api/v1/collaborations/events",
            get(get_events).post(create_event),
        )
        .route("/api/v1/collaborations/events/{event_id}", get(get_event))
        .route(
            "/api/v1/collaborations/events/{event_id}/comment",
            post(comment_on_event),
        )
}

fn author_of(claims: &TokenClaims) -> AppResult<Author> {
    Ok(Author {
        user_id: claims.user_id()?,
        name: claims.name.clone(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/collaborations/discussions",
    responses(
        (status = 200, description = "Discussions, most recently active first", body = [DiscussionResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn get_discussions(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
) -> AppResult<(StatusCode, Json<Vec<DiscussionResponse>>)> {
    let discussions = CollaborationRepository::new(&state.db)
        .find_discussions()
        .await?
        .into_iter()
        .map(DiscussionResponse::from_model)
        .collect::<AppResult<Vec<_>>>()?;

    Ok((StatusCode::OK, Json(discussions)))
}

#[utoipa::path(
    post,
    path = "/api/v1/collaborations/discussions",
    request_body = CreateDiscussionRequest,
    responses(
        (status = 201, description = "Discussion started", body = DiscussionResponse),
        (status = 400, description = "Missing title or content", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn create_discussion(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateDiscussionRequest>,
) -> AppResult<(StatusCode, Json<DiscussionResponse>)> {
    let discussion = CollaborationRepository::new(&state.db)
        .create_discussion(&author_of(&claims)?, &payload.title, &payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(DiscussionResponse::from_model(discussion)?)))
}

#[utoipa::path(
    get,
    path = "/api/v1/collaborations/discussions/{discussion_id}",
    params(("discussion_id" = Uuid, Path, description = "Discussion ID")),
    responses(
        (status = 200, description = "Discussion with replies", body = DiscussionResponse),
        (status = 404, description = "Discussion not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn get_discussion(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Path(discussion_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<DiscussionResponse>)> {
    let discussion = CollaborationRepository::new(&state.db)
        .find_discussion(discussion_id)
        .await?;

    Ok((StatusCode::OK, Json(DiscussionResponse::from_model(discussion)?)))
}

#[utoipa::path(
    post,
    path = "/api/v1/collaborations/discussions/{discussion_id}/reply",
    params(("discussion_id" = Uuid, Path, description = "Discussion ID")),
    request_body = ThreadEntryRequest,
    responses(
        (status = 200, description = "Reply appended", body = DiscussionResponse),
        (status = 400, description = "Empty reply", body = ErrorResponse),
        (status = 404, description = "Discussion not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn reply_to_discussion(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(discussion_id): Path<Uuid>,
    Json(payload): Json<ThreadEntryRequest>,
) -> AppResult<(StatusCode, Json<DiscussionResponse>)> {
    let discussion = CollaborationRepository::new(&state.db)
        .add_reply(discussion_id, &author_of(&claims)?, &payload.content)
        .await?;

    Ok((StatusCode::OK, Json(DiscussionResponse::from_model(discussion)?)))
}

#[utoipa::path(
    get,
    path = "/api/v1/collaborations/meetings",
    responses(
        (status = 200, description = "Meetings by date", body = [ScheduledItemResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn get_meetings(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
) -> AppResult<(StatusCode, Json<Vec<ScheduledItemResponse>>)> {
    let meetings = CollaborationRepository::new(&state.db)
        .find_meetings()
        .await?
        .into_iter()
        .map(ScheduledItemResponse::from_meeting)
        .collect::<AppResult<Vec<_>>>()?;

    Ok((StatusCode::OK, Json(meetings)))
}

#[utoipa::path(
    post,
    path = "/api/v1/collaborations/meetings",
    request_body = CreateScheduledItemRequest,
    responses(
        (status = 201, description = "Meeting scheduled", body = ScheduledItemResponse),
        (status = 400, description = "Missing date, time or location", body = ErrorResponse),
        (status = 403, description = "Administrator or supervisor only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn create_meeting(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateScheduledItemRequest>,
) -> AppResult<(StatusCode, Json<ScheduledItemResponse>)> {
    claims.require_admin_or_supervisor()?;

    let meeting = CollaborationRepository::new(&state.db)
        .create_meeting(&author_of(&claims)?, payload.into_new_item()?)
        .await?;

    Ok((StatusCode::CREATED, Json(ScheduledItemResponse::from_meeting(meeting)?)))
}

#[utoipa::path(
    get,
    path = "/api/v1/collaborations/meetings/{meeting_id}",
    params(("meeting_id" = Uuid, Path, description = "Meeting ID")),
    responses(
        (status = 200, description = "Meeting with comments", body = ScheduledItemResponse),
        (status = 404, description = "Meeting not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn get_meeting(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Path(meeting_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ScheduledItemResponse>)> {
    let meeting = CollaborationRepository::new(&state.db)
        .find_meeting(meeting_id)
        .await?;

    Ok((StatusCode::OK, Json(ScheduledItemResponse::from_meeting(meeting)?)))
}

#[utoipa::path(
    post,
    path = "/api/v1/collaborations/meetings/{meeting_id}/comment",
    params(("meeting_id" = Uuid, Path, description = "Meeting ID")),
    request_body = ThreadEntryRequest,
    responses(
        (status = 200, description = "Comment appended", body = ScheduledItemResponse),
        (status = 404, description = "Meeting not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn comment_on_meeting(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(meeting_id): Path<Uuid>,
    Json(payload): Json<ThreadEntryRequest>,
) -> AppResult<(StatusCode, Json<ScheduledItemResponse>)> {
    let meeting = CollaborationRepository::new(&state.db)
        .add_meeting_comment(meeting_id, &author_of(&claims)?, &payload.content)
        .await?;

    Ok((StatusCode::OK, Json(ScheduledItemResponse::from_meeting(meeting)?)))
}

#[utoipa::path(
    get,
    path = "/api/v1/collaborations/events",
    responses(
        (status = 200, description = "Events by date", body = [ScheduledItemResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn get_events(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
) -> AppResult<(StatusCode, Json<Vec<ScheduledItemResponse>>)> {
    let events = CollaborationRepository::new(&state.db)
        .find_events()
        .await?
        .into_iter()
        .map(ScheduledItemResponse::from_event)
        .collect::<AppResult<Vec<_>>>()?;

    Ok((StatusCode::OK, Json(events)))
}

#[utoipa::path(
    post,
    path = "/api/v1/collaborations/events",
    request_body = CreateScheduledItemRequest,
    responses(
        (status = 201, description = "Event created", body = ScheduledItemResponse),
        (status = 400, description = "Missing date, time or location", body = ErrorResponse),
        (status = 403, description = "Administrator or supervisor only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn create_event(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(payload): Json<CreateScheduledItemRequest>,
) -> AppResult<(StatusCode, Json<ScheduledItemResponse>)> {
    claims.require_admin_or_supervisor()?;

    let event = CollaborationRepository::new(&state.db)
        .create_event(&author_of(&claims)?, payload.into_new_item()?)
        .await?;

    Ok((StatusCode::CREATED, Json(ScheduledItemResponse::from_event(event)?)))
}

#[utoipa::path(
    get,
    path = "/api/v1/collaborations/events/{event_id}",
    params(("event_id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event with comments", body = ScheduledItemResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn get_event(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Path(event_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ScheduledItemResponse>)> {
    let event = CollaborationRepository::new(&state.db)
        .find_event(event_id)
        .await?;

    Ok((StatusCode::OK, Json(ScheduledItemResponse::from_event(event)?)))
}

#[utoipa::path(
    post,
    path = "/api/v1/collaborations/events/{event_id}/comment",
    params(("event_id" = Uuid, Path, description = "Event ID")),
    request_body = ThreadEntryRequest,
    responses(
        (status = 200, description = "Comment appended", body = ScheduledItemResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Collaborations"
)]
pub async fn comment_on_event(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<ThreadEntryRequest>,
) -> AppResult<(StatusCode, Json<ScheduledItemResponse>)> {
    let event = CollaborationRepository::new(&state.db)
        .add_event_comment(event_id, &author_of(&claims)?, &payload.content)
        .await?;

    Ok((StatusCode::OK, Json(ScheduledItemResponse::from_event(event)?)))
}
