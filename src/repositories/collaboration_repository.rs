use crate::entities::{discussion, event, meeting};
use crate::error::{AppError, AppResult};
use chrono::{Duration, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// A reply on a discussion or a comment on a meeting or event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThreadEntry {
    pub entry_id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub created_at: NaiveDateTime,
}

/// Who is writing, taken from the session.
#[derive(Debug, Clone)]
pub struct Author {
    pub user_id: Uuid,
    pub name: String,
}

pub struct NewScheduledItem {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
}

pub fn thread_entries(list: &Value) -> AppResult<Vec<ThreadEntry>> {
    if list.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(list.clone()).map_err(|e| {
        AppError::PersistenceFailure(anyhow::anyhow!("Stored thread is malformed: {}", e))
    })
}

fn append_entry(list: &Value, author: &Author, content: &str) -> AppResult<Value> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::validation("Content must not be empty"));
    }

    let mut entries = thread_entries(list)?;
    entries.push(ThreadEntry {
        entry_id: Uuid::new_v4(),
        content: content.to_string(),
        author_id: author.user_id,
        author_name: author.name.clone(),
        created_at: Utc::now().naive_utc(),
    });
    serde_json::to_value(entries).map_err(|e| AppError::PersistenceFailure(e.into()))
}

/// Appends re-read and retry when another writer got in between.
const MAX_APPEND_ATTEMPTS: usize = 10;

/// `updated_at` for an append; strictly later than the previous value and
/// whole microseconds, so it survives the database round trip unchanged.
/// Appends use it as the compare-and-swap token.
fn next_updated_at(previous: NaiveDateTime) -> NaiveDateTime {
    Utc::now()
        .naive_utc()
        .max(previous + Duration::microseconds(1))
        .trunc_subsecs(6)
}

fn require_text(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

pub struct CollaborationRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CollaborationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    // Discussions

    pub async fn create_discussion(
        &self,
        author: &Author,
        title: &str,
        content: &str,
    ) -> AppResult<discussion::Model> {
        let now = Utc::now().naive_utc();
        let discussion_model = discussion::ActiveModel {
            discussion_id: Set(Uuid::new_v4()),
            title: Set(require_text(title, "Title")?),
            content: Set(require_text(content, "Content")?),
            author_id: Set(author.user_id),
            author_name: Set(author.name.clone()),
            replies: Set(Value::Array(Vec::new())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = discussion_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn find_discussions(&self) -> AppResult<Vec<discussion::Model>> {
        let discussions = discussion::Entity::find()
            .order_by_desc(discussion::Column::UpdatedAt)
            .all(self.db)
            .await?;
        Ok(discussions)
    }

    pub async fn find_discussion(&self, discussion_id: Uuid) -> AppResult<discussion::Model> {
        discussion::Entity::find_by_id(discussion_id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Discussion not found"))
    }

    pub async fn add_reply(
        &self,
        discussion_id: Uuid,
        author: &Author,
        content: &str,
    ) -> AppResult<discussion::Model> {
        for _ in 0..MAX_APPEND_ATTEMPTS {
            let current = self.find_discussion(discussion_id).await?;
            let replies = append_entry(&current.replies, author, content)?;
            let updated_at = next_updated_at(current.updated_at);

            let result = discussion::Entity::update_many()
                .col_expr(discussion::Column::Replies, Expr::value(replies.clone()))
                .col_expr(discussion::Column::UpdatedAt, Expr::value(updated_at))
                .filter(discussion::Column::DiscussionId.eq(discussion_id))
                .filter(discussion::Column::UpdatedAt.eq(current.updated_at))
                .exec(self.db)
                .await?;

            if result.rows_affected == 1 {
                return Ok(discussion::Model {
                    replies,
                    updated_at,
                    ..current
                });
            }
        }

        tracing::warn!(discussion_id = %discussion_id, "reply lost the race on every attempt");
        Err(AppError::conflict("Discussion is busy, please retry"))
    }

    // Meetings

    pub async fn create_meeting(
        &self,
        organizer: &Author,
        item: NewScheduledItem,
    ) -> AppResult<meeting::Model> {
        let now = Utc::now().naive_utc();
        let meeting_model = meeting::ActiveModel {
            meeting_id: Set(Uuid::new_v4()),
            title: Set(require_text(&item.title, "Title")?),
            description: Set(item.description.trim().to_string()),
            meeting_date: Set(item.date),
            meeting_time: Set(require_text(&item.time, "Time")?),
            location: Set(require_text(&item.location, "Location")?),
            organizer_id: Set(organizer.user_id),
            organizer_name: Set(organizer.name.clone()),
            comments: Set(Value::Array(Vec::new())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = meeting_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn find_meetings(&self) -> AppResult<Vec<meeting::Model>> {
        let meetings = meeting::Entity::find()
            .order_by_asc(meeting::Column::MeetingDate)
            .order_by_asc(meeting::Column::MeetingTime)
            .all(self.db)
            .await?;
        Ok(meetings)
    }

    pub async fn find_meeting(&self, meeting_id: Uuid) -> AppResult<meeting::Model> {
        meeting::Entity::find_by_id(meeting_id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Meeting not found"))
    }

    pub async fn add_meeting_comment(
        &self,
        meeting_id: Uuid,
        author: &Author,
        content: &str,
    ) -> AppResult<meeting::Model> {
        for _ in 0..MAX_APPEND_ATTEMPTS {
            let current = self.find_meeting(meeting_id).await?;
            let comments = append_entry(&current.comments, author, content)?;
            let updated_at = next_updated_at(current.updated_at);

            let result = meeting::Entity::update_many()
                .col_expr(meeting::Column::Comments, Expr::value(comments.clone()))
                .col_expr(meeting::Column::UpdatedAt, Expr::value(updated_at))
                .filter(meeting::Column::MeetingId.eq(meeting_id))
                .filter(meeting::Column::UpdatedAt.eq(current.updated_at))
                .exec(self.db)
                .await?;

            if result.rows_affected == 1 {
                return Ok(meeting::Model {
                    comments,
                    updated_at,
                    ..current
                });
            }
        }

        tracing::warn!(meeting_id = %meeting_id, "comment lost the race on every attempt");
        Err(AppError::conflict("Meeting is busy, please retry"))
    }

    // Events

    pub async fn create_event(
        &self,
        organizer: &Author,
        item: NewScheduledItem,
    ) -> AppResult<event::Model> {
        let now = Utc::now().naive_utc();
        let event_model = event::ActiveModel {
            event_id: Set(Uuid::new_v4()),
            title: Set(require_text(&item.title, "Title")?),
            description: Set(item.description.trim().to_string()),
            event_date: Set(item.date),
            event_time: Set(require_text(&item.time, "Time")?),
            location: Set(require_text(&item.location, "Location")?),
            organizer_id: Set(organizer.user_id),
            organizer_name: Set(organizer.name.clone()),
            comments: Set(Value::Array(Vec::new())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = event_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn find_events(&self) -> AppResult<Vec<event::Model>> {
        let events = event::Entity::find()
            .order_by_asc(event::Column::EventDate)
            .order_by_asc(event::Column::EventTime)
            .all(self.db)
            .await?;
        Ok(events)
    }

    pub async fn find_event(&self, event_id: Uuid) -> AppResult<event::Model> {
        event::Entity::find_by_id(event_id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    pub async fn add_event_comment(
        &self,
        event_id: Uuid,
        author: &Author,
        content: &str,
    ) -> AppResult<event::Model> {
        for _ in 0..MAX_APPEND_ATTEMPTS {
            let current = self.find_event(event_id).await?;
            let comments = append_entry(&current.comments, author, content)?;
            let updated_at = next_updated_at(current.updated_at);

            let result = event::Entity::update_many()
                .col_expr(event::Column::Comments, Expr::value(comments.clone()))
                .col_expr(event::Column::UpdatedAt, Expr::value(updated_at))
                .filter(event::Column::EventId.eq(event_id))
                .filter(event::Column::UpdatedAt.eq(current.updated_at))
                .exec(self.db)
                .await?;

            if result.rows_affected == 1 {
                return Ok(event::Model {
                    comments,
                    updated_at,
                    ..current
                });
            }
        }

        tracing::warn!(event_id = %event_id, "comment lost the race on every attempt");
        Err(AppError::conflict("Event is busy, please retry"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn author() -> Author {
        Author {
            user_id: Uuid::new_v4(),
            name: "Asha Nair".to_string(),
        }
    }

    #[test]
    fn append_keeps_existing_entries_in_order() {
        let author = author();
        let first = append_entry(&json!([]), &author, "first").unwrap();
        let second = append_entry(&first, &author, "second").unwrap();

        let entries = thread_entries(&second).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "first");
        assert_eq!(entries[1].content, "second");
        assert_eq!(entries[1].author_name, "Asha Nair");
    }

    #[test]
    fn blank_content_is_rejected() {
        let result = append_entry(&json!([]), &author(), "  \n ");
        assert!(matches!(result, Err(AppError::ValidationFailed(_))));
    }

    #[test]
    fn updated_at_always_moves_forward() {
        let future = Utc::now().naive_utc() + Duration::hours(1);
        assert!(next_updated_at(future) > future);

        let fractional = future + Duration::nanoseconds(1_500);
        let next = next_updated_at(fractional);
        assert!(next > fractional);
        assert_eq!(next.and_utc().timestamp_subsec_nanos() % 1_000, 0);
    }
}
