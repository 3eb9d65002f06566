//! PostgreSQL implementation of ChatStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use rtc_core::entities::{ChatMembership, ChatRoom, Message, MessageRead};
use rtc_core::traits::{ChatStore, StoreResult};
use rtc_core::value_objects::{MessageId, RoomId, UserId};

use crate::models::{MembershipModel, MessageModel, RoomModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ChatStore
#[derive(Clone)]
pub struct PgChatStore {
    pool: PgPool,
}

impl PgChatStore {
    /// Create a new PgChatStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatStore for PgChatStore {
    #[instrument(skip(self))]
    async fn membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> StoreResult<Option<ChatMembership>> {
        let result = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT room_id, user_id, last_seen_at
            FROM chat_memberships
            WHERE room_id = $1 AND user_id = $2
            "#,
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatMembership::from))
    }

    #[instrument(skip(self))]
    async fn rooms_for_user(&self, user_id: UserId) -> StoreResult<Vec<RoomId>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT room_id FROM chat_memberships WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(RoomId::new).collect())
    }

    #[instrument(skip(self))]
    async fn room_by_id(&self, room_id: RoomId) -> StoreResult<Option<ChatRoom>> {
        let result = sqlx::query_as::<_, RoomModel>(
            r#"
            SELECT id, room_type, created_by, created_at
            FROM chat_rooms
            WHERE id = $1
            "#,
        )
        .bind(room_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatRoom::from))
    }

    #[instrument(skip(self))]
    async fn member_count(&self, room_id: RoomId) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM chat_memberships WHERE room_id = $1
            "#,
        )
        .bind(room_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, room))]
    async fn insert_room(&self, room: &ChatRoom) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_rooms (id, room_type, created_by, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(room.id.into_inner())
        .bind(room.room_type.as_str())
        .bind(room.created_by.into_inner())
        .bind(room.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, user_ids))]
    async fn insert_memberships(&self, room_id: RoomId, user_ids: &[UserId]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for user_id in user_ids {
            sqlx::query(
                r#"
                INSERT INTO chat_memberships (room_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (room_id, user_id) DO NOTHING
                "#,
            )
            .bind(room_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    /// Atomic insert-or-return-existing on the canonical pair key.
    ///
    /// The `ON CONFLICT ... DO UPDATE` form (rather than `DO NOTHING`) makes
    /// the statement return a row either way, so both racing callers read the
    /// id of the single surviving room. Membership inserts are idempotent and
    /// run in the same transaction.
    #[instrument(skip(self, room))]
    async fn create_direct_room(&self, room: &ChatRoom, other: UserId) -> StoreResult<RoomId> {
        let dm_key = ChatRoom::direct_key(room.created_by, other);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let winning_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO chat_rooms (id, room_type, created_by, created_at, dm_key)
            VALUES ($1, 'private', $2, $3, $4)
            ON CONFLICT (dm_key) DO UPDATE SET dm_key = EXCLUDED.dm_key
            RETURNING id
            "#,
        )
        .bind(room.id.into_inner())
        .bind(room.created_by.into_inner())
        .bind(room.created_at)
        .bind(&dm_key)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for user_id in [room.created_by, other] {
            sqlx::query(
                r#"
                INSERT INTO chat_memberships (room_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (room_id, user_id) DO NOTHING
                "#,
            )
            .bind(winning_id)
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(RoomId::new(winning_id))
    }

    #[instrument(skip(self, message))]
    async fn insert_message(&self, message: &Message) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, room_id, sender_id, content, file_url, created_at, seen)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id.into_inner())
        .bind(message.room_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(message.content.as_deref())
        .bind(message.file_url.as_deref())
        .bind(message.created_at)
        .bind(message.seen)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, read))]
    async fn upsert_message_read(&self, read: &MessageRead) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO message_reads (message_id, user_id, read_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (message_id, user_id) DO UPDATE SET read_at = EXCLUDED.read_at
            "#,
        )
        .bind(read.message_id.into_inner())
        .bind(read.user_id.into_inner())
        .bind(read.read_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_membership_last_seen(
        &self,
        room_id: RoomId,
        user_id: UserId,
        seen_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE chat_memberships
            SET last_seen_at = $3
            WHERE room_id = $1 AND user_id = $2
            "#,
        )
        .bind(room_id.into_inner())
        .bind(user_id.into_inner())
        .bind(seen_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn message_by_id(&self, message_id: MessageId) -> StoreResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, room_id, sender_id, content, file_url, created_at, seen
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(message_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }
}
