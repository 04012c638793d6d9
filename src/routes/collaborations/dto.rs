use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{discussion, event, meeting};
use crate::error::{AppError, AppResult};
use crate::repositories::NewScheduledItem;
use crate::repositories::collaboration_repository::{ThreadEntry, thread_entries};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussionRequest {
    #[schema(example = "Reading group for seminar 2")]
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduledItemRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(example = "2026-03-14")]
    pub date: String,
    #[schema(example = "14:30")]
    pub time: String,
    #[schema(example = "Seminar Hall 2")]
    pub location: String,
}

impl CreateScheduledItemRequest {
    pub fn into_new_item(self) -> AppResult<NewScheduledItem> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::validation("date must be YYYY-MM-DD"))?;
        let time = NaiveTime::parse_from_str(self.time.trim(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(self.time.trim(), "%H:%M:%S"))
            .map_err(|_| AppError::validation("time must be HH:MM"))?;

        Ok(NewScheduledItem {
            title: self.title,
            description: self.description,
            date,
            time: time.format("%H:%M").to_string(),
            location: self.location,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ThreadEntryRequest {
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionResponse {
    pub discussion_id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub replies: Vec<ThreadEntry>,
    pub created_at: String,
    pub updated_at: String,
}

impl DiscussionResponse {
    pub fn from_model(model: discussion::Model) -> AppResult<Self> {
        Ok(Self {
            replies: thread_entries(&model.replies)?,
            discussion_id: model.discussion_id,
            title: model.title,
            content: model.content,
            author_id: model.author_id,
            author_name: model.author_name,
            created_at: model.created_at.to_string(),
            updated_at: model.updated_at.to_string(),
        })
    }
}

/// A meeting or an event.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub comments: Vec<ThreadEntry>,
    pub created_at: String,
    pub updated_at: String,
}

impl ScheduledItemResponse {
    pub fn from_meeting(model: meeting::Model) -> AppResult<Self> {
        Ok(Self {
            comments: thread_entries(&model.comments)?,
            id: model.meeting_id,
            title: model.title,
            description: model.description,
            date: model.meeting_date,
            time: model.meeting_time,
            location: model.location,
            organizer_id: model.organizer_id,
            organizer_name: model.organizer_name,
            created_at: model.created_at.to_string(),
            updated_at: model.updated_at.to_string(),
        })
    }

    pub fn from_event(model: event::Model) -> AppResult<Self> {
        Ok(Self {
            comments: thread_entries(&model.comments)?,
            id: model.event_id,
            title: model.title,
            description: model.description,
            date: model.event_date,
            time: model.event_time,
            location: model.location,
            organizer_id: model.organizer_id,
            organizer_name: model.organizer_name,
            created_at: model.created_at.to_string(),
            updated_at: model.updated_at.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: &str, time: &str) -> CreateScheduledItemRequest {
        CreateScheduledItemRequest {
            title: "DC review".to_string(),
            description: String::new(),
            date: date.to_string(),
            time: time.to_string(),
            location: "Room 4".to_string(),
        }
    }

    #[test]
    fn normalizes_time_to_hours_and_minutes() {
        let item = request("2026-03-14", "09:05:00").into_new_item().unwrap();
        assert_eq!(item.time, "09:05");
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn rejects_malformed_date_and_time() {
        assert!(request("14/03/2026", "09:05").into_new_item().is_err());
        assert!(request("2026-03-14", "late").into_new_item().is_err());
    }
}
