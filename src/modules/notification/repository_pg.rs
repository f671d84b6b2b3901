use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    api::error,
    modules::notification::{
        model::NewNotification,
        repository::NotificationRepository,
        schema::{NotificationEntity, NotificationKind, TagPayload},
    },
};

#[derive(Clone)]
pub struct NotificationRepositoryPg {
    pool: sqlx::PgPool,
}

impl NotificationRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl NotificationRepository for NotificationRepositoryPg {
    async fn insert_many(&self, rows: &[NewNotification]) -> Result<u64, error::SystemError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let ids: Vec<Uuid> =
            rows.iter().map(|_| Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))).collect();
        let recipients: Vec<Uuid> = rows.iter().map(|r| r.recipient_id).collect();
        let actors: Vec<Uuid> = rows.iter().map(|r| r.actor_id).collect();
        let posts: Vec<Option<Uuid>> = rows.iter().map(|r| r.post_id).collect();
        let kinds: Vec<String> = rows.iter().map(|r| r.kind.as_str().to_string()).collect();
        let payloads: Vec<Json<TagPayload>> = rows.iter().map(|r| Json(r.payload.clone())).collect();

        let inserted = sqlx::query(
            r#"
            INSERT INTO notifications (id, recipient_id, actor_id, post_id, kind, payload)
            SELECT id, recipient_id, actor_id, post_id, kind::notification_kind, payload
            FROM unnest($1::uuid[], $2::uuid[], $3::uuid[], $4::uuid[], $5::text[], $6::jsonb[])
                AS t(id, recipient_id, actor_id, post_id, kind, payload)
            "#,
        )
        .bind(ids)
        .bind(recipients)
        .bind(actors)
        .bind(posts)
        .bind(kinds)
        .bind(payloads)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError> {
        let notification =
            sqlx::query_as::<_, NotificationEntity>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(notification)
    }

    async fn mark_read(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError> {
        let notification = sqlx::query_as::<_, NotificationEntity>(
            "UPDATE notifications SET read = true WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn find_unread_for(
        &self,
        recipient_id: &Uuid,
        kind: NotificationKind,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        let notifications = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT *
            FROM notifications
            WHERE recipient_id = $1 AND kind = $2 AND read = false
            ORDER BY created_at DESC
            "#,
        )
        .bind(recipient_id)
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }
}
