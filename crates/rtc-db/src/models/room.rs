//! Room database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for chat_rooms table
#[derive(Debug, Clone, FromRow)]
pub struct RoomModel {
    pub id: Uuid,
    pub room_type: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}
