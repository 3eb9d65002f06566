//! Membership database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for chat_memberships table
#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub last_seen_at: Option<DateTime<Utc>>,
}
