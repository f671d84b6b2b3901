use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use crate::modules::{
    notification::schema::{NotificationEntity, NotificationKind, TagPayload},
    profile::model::ProfileSummary,
};

/// Someone picked in the composer's tag list.
#[derive(Debug, Clone, PartialEq)]
pub struct TagTarget {
    pub id: Uuid,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TagContext {
    pub mood: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub post_id: Option<Uuid>,
    pub kind: NotificationKind,
    pub payload: TagPayload,
}

/// One row per distinct tagged person, in first-tagged order.
pub fn build_tag_notifications(
    post_id: Uuid,
    actor_id: Uuid,
    targets: &[TagTarget],
    context: &TagContext,
) -> Vec<NewNotification> {
    let mut seen = HashSet::with_capacity(targets.len());
    targets
        .iter()
        .filter(|t| seen.insert(t.id))
        .map(|t| NewNotification {
            recipient_id: t.id,
            actor_id,
            post_id: Some(post_id),
            kind: NotificationKind::Tag,
            payload: TagPayload {
                tagged_name: t.name.clone(),
                mood: context.mood.clone(),
                location: context.location.clone(),
            },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub requested: usize,
    pub inserted: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagNotificationResponse {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub actor: Option<ProfileSummary>,
    pub post_id: Option<Uuid>,
    pub payload: TagPayload,
    pub read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TagNotificationResponse {
    pub fn new(entity: NotificationEntity, actor: Option<ProfileSummary>) -> Self {
        TagNotificationResponse {
            id: entity.id,
            actor_id: entity.actor_id,
            actor,
            post_id: entity.post_id,
            payload: entity.payload.0,
            read: entity.read,
            created_at: entity.created_at,
        }
    }
}

/// A pending request addressed to the viewer. Unread for as long as it exists.
#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestNotice {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub requester: Option<ProfileSummary>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationsOverview {
    pub friend_requests: Vec<FriendRequestNotice>,
    pub tags: Vec<TagNotificationResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_tags_yield_one_row_each() {
        let post = Uuid::now_v7();
        let actor = Uuid::now_v7();
        let b = TagTarget { id: Uuid::now_v7(), name: Some("Bob".into()) };
        let c = TagTarget { id: Uuid::now_v7(), name: Some("Carol".into()) };
        let context = TagContext { mood: Some("celebrating 🎉".into()), location: None };

        let rows = build_tag_notifications(post, actor, &[b.clone(), b.clone(), c.clone()], &context);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].recipient_id, b.id);
        assert_eq!(rows[1].recipient_id, c.id);
        assert!(rows.iter().all(|r| r.actor_id == actor && r.post_id == Some(post)));
        assert_eq!(rows[1].payload.tagged_name.as_deref(), Some("Carol"));
        assert_eq!(rows[1].payload.mood.as_deref(), Some("celebrating 🎉"));
    }

    #[test]
    fn no_targets_no_rows() {
        assert!(
            build_tag_notifications(Uuid::now_v7(), Uuid::now_v7(), &[], &TagContext::default())
                .is_empty()
        );
    }
}
