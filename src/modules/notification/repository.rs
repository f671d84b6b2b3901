use uuid::Uuid;

use crate::{
    api::error,
    modules::notification::{
        model::NewNotification,
        schema::{NotificationEntity, NotificationKind},
    },
};

#[async_trait::async_trait]
pub trait NotificationRepository {
    /// Inserts every row in one statement. Returns the number of rows written.
    async fn insert_many(&self, rows: &[NewNotification]) -> Result<u64, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid)
    -> Result<Option<NotificationEntity>, error::SystemError>;

    async fn mark_read(&self, id: &Uuid)
    -> Result<Option<NotificationEntity>, error::SystemError>;

    /// Newest first.
    async fn find_unread_for(
        &self,
        recipient_id: &Uuid,
        kind: NotificationKind,
    ) -> Result<Vec<NotificationEntity>, error::SystemError>;
}
