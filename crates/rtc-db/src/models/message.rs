//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: Uuid,
    pub room_id: Uuid,
    pub sender_id: Uuid,
    pub content: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub seen: bool,
}
