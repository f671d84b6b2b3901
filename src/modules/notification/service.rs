use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        notification::{
            model::{
                build_tag_notifications, DispatchReport, FriendRequestNotice,
                NotificationsOverview, TagContext, TagNotificationResponse, TagTarget,
            },
            repository::NotificationRepository,
            schema::NotificationKind,
        },
        profile::{model::index_profiles, repository::ProfileRepository},
        relationship::repository::RelationshipRepository,
    },
};

/// Tag dispatch and the two unread views: pending friend requests (live from
/// the relationship store) and tag notifications (explicit `read` flag).
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: Arc<dyn NotificationRepository + Send + Sync>,
    relationship_repo: Arc<dyn RelationshipRepository + Send + Sync>,
    profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
}

impl NotificationService {
    pub fn with_dependencies(
        notification_repo: Arc<dyn NotificationRepository + Send + Sync>,
        relationship_repo: Arc<dyn RelationshipRepository + Send + Sync>,
        profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
    ) -> Self {
        NotificationService { notification_repo, relationship_repo, profile_repo }
    }

    pub async fn dispatch_tag_notifications(
        &self,
        post_id: Uuid,
        actor_id: Uuid,
        targets: &[TagTarget],
        context: &TagContext,
    ) -> Result<DispatchReport, error::SystemError> {
        let rows = build_tag_notifications(post_id, actor_id, targets, context);
        if rows.is_empty() {
            return Ok(DispatchReport { requested: 0, inserted: 0 });
        }

        let inserted = self.notification_repo.insert_many(&rows).await?;
        Ok(DispatchReport { requested: rows.len(), inserted })
    }

    /// Runs the dispatch detached from the caller. Failures are logged here
    /// and go nowhere else.
    pub fn spawn_tag_dispatch(
        &self,
        post_id: Uuid,
        actor_id: Uuid,
        targets: Vec<TagTarget>,
        context: TagContext,
    ) -> JoinHandle<()> {
        let service = self.clone();
        actix_web::rt::spawn(async move {
            match service.dispatch_tag_notifications(post_id, actor_id, &targets, &context).await {
                Ok(report) => tracing::info!(
                    %post_id,
                    %actor_id,
                    requested = report.requested,
                    inserted = report.inserted,
                    "tag notifications dispatched"
                ),
                Err(e) => tracing::error!(
                    %post_id,
                    %actor_id,
                    error = %e,
                    "failed to create tag notifications"
                ),
            }
        })
    }

    pub async fn friend_requests(
        &self,
        viewer_id: Uuid,
    ) -> Result<Vec<FriendRequestNotice>, error::SystemError> {
        let pending = self.relationship_repo.find_pending_to(&viewer_id).await?;
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let requester_ids: Vec<Uuid> = pending.iter().map(|r| r.requester_id).collect();
        let profiles = index_profiles(self.profile_repo.find_by_ids(&requester_ids).await?);

        Ok(pending
            .into_iter()
            .map(|r| FriendRequestNotice {
                id: r.id,
                requester_id: r.requester_id,
                requester: profiles.get(&r.requester_id).cloned(),
                created_at: r.created_at,
            })
            .collect())
    }

    pub async fn tag_notifications(
        &self,
        viewer_id: Uuid,
    ) -> Result<Vec<TagNotificationResponse>, error::SystemError> {
        let rows = self.notification_repo.find_unread_for(&viewer_id, NotificationKind::Tag).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut actor_ids: Vec<Uuid> = rows.iter().map(|n| n.actor_id).collect();
        actor_ids.sort_unstable();
        actor_ids.dedup();
        let actors = index_profiles(self.profile_repo.find_by_ids(&actor_ids).await?);

        Ok(rows
            .into_iter()
            .map(|n| {
                let actor = actors.get(&n.actor_id).cloned();
                TagNotificationResponse::new(n, actor)
            })
            .collect())
    }

    pub async fn overview(
        &self,
        viewer_id: Uuid,
    ) -> Result<NotificationsOverview, error::SystemError> {
        let (friend_requests, tags) =
            tokio::try_join!(self.friend_requests(viewer_id), self.tag_notifications(viewer_id))?;
        Ok(NotificationsOverview { friend_requests, tags })
    }

    /// Idempotent. Returns the viewer's unread tag list as stored afterwards.
    pub async fn mark_tag_read(
        &self,
        viewer_id: Uuid,
        notification_id: Uuid,
    ) -> Result<Vec<TagNotificationResponse>, error::SystemError> {
        let notification = self
            .notification_repo
            .find_by_id(&notification_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Notification not found"))?;

        if notification.recipient_id != viewer_id {
            return Err(error::SystemError::forbidden(
                "You are not allowed to update this notification",
            ));
        }

        if !notification.read
            && self.notification_repo.mark_read(&notification_id).await?.is_none()
        {
            return Err(error::SystemError::not_found("Notification not found"));
        }

        self.tag_notifications(viewer_id).await
    }
}
