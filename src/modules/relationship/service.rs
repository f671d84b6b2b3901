use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    constants::{TAG_SUGGESTION_LIMIT, TAG_SUGGESTION_MIN_QUERY},
    modules::{
        profile::{
            model::{index_profiles, ProfileSummary},
            repository::ProfileRepository,
        },
        relationship::{
            model::{
                derive_status, transition, RelationshipAction, RelationshipStatus,
                RelationshipView,
            },
            repository::RelationshipRepository,
            schema::{RelationshipEntity, RelationshipState},
        },
    },
};

/// Friendship transitions. Holds no state of its own: every returned view
/// is derived from a fresh read of the store.
#[derive(Clone)]
pub struct RelationshipService {
    relationship_repo: Arc<dyn RelationshipRepository + Send + Sync>,
    profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
}

impl RelationshipService {
    pub fn with_dependencies(
        relationship_repo: Arc<dyn RelationshipRepository + Send + Sync>,
        profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
    ) -> Self {
        RelationshipService { relationship_repo, profile_repo }
    }

    pub async fn status(
        &self,
        viewer_id: Uuid,
        subject_id: Uuid,
    ) -> Result<RelationshipView, error::SystemError> {
        if viewer_id == subject_id {
            return Ok(RelationshipView::derive(&viewer_id, &subject_id, None));
        }

        let row = self.relationship_repo.find_between(&viewer_id, &subject_id).await?;
        Ok(RelationshipView::derive(&viewer_id, &subject_id, row))
    }

    pub async fn send_request(
        &self,
        viewer_id: Uuid,
        subject_id: Uuid,
    ) -> Result<RelationshipView, error::SystemError> {
        if viewer_id == subject_id {
            transition(RelationshipStatus::Myself, RelationshipAction::SendRequest)?;
        }

        if self.profile_repo.find_by_id(&subject_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        match self.relationship_repo.find_between(&viewer_id, &subject_id).await? {
            // a rejected row derives to none, so it must not block a new request
            Some(row) if row.status == RelationshipState::Rejected => {
                self.relationship_repo
                    .delete_in_state(&row.id, RelationshipState::Rejected)
                    .await?;
            }
            Some(_) => return Err(error::SystemError::conflict()),
            None => {}
        }

        // A concurrent request for the same pair loses on the store's unique index.
        let created = self.relationship_repo.create_request(&viewer_id, &subject_id).await?;
        info!("Friend request {} sent from {} to {}", created.id, viewer_id, subject_id);

        self.status(viewer_id, subject_id).await
    }

    pub async fn cancel_request(
        &self,
        viewer_id: Uuid,
        relationship_id: Uuid,
    ) -> Result<RelationshipView, error::SystemError> {
        let row = self.load_for(&viewer_id, &relationship_id).await?;
        guard(&viewer_id, &row, RelationshipAction::CancelRequest)?;

        if !self.relationship_repo.delete_in_state(&relationship_id, RelationshipState::Pending).await?
        {
            return Err(self.explain_lost_race(&relationship_id).await);
        }
        info!("Friend request {} cancelled by {}", relationship_id, viewer_id);

        self.status(viewer_id, row.counterpart_of(&viewer_id)).await
    }

    pub async fn respond(
        &self,
        viewer_id: Uuid,
        relationship_id: Uuid,
        accept: bool,
    ) -> Result<RelationshipView, error::SystemError> {
        let row = self.load_for(&viewer_id, &relationship_id).await?;
        let action =
            if accept { RelationshipAction::Accept } else { RelationshipAction::Reject };
        guard(&viewer_id, &row, action)?;

        // each answer is a single conditional write, so a failure leaves the row pending
        let written = if accept {
            self.relationship_repo
                .resolve_pending(&relationship_id, RelationshipState::Accepted, chrono::Utc::now())
                .await?
                .is_some()
        } else {
            self.relationship_repo
                .delete_in_state(&relationship_id, RelationshipState::Pending)
                .await?
        };
        if !written {
            return Err(self.explain_lost_race(&relationship_id).await);
        }
        info!("Friend request {} answered by {}: accept={}", relationship_id, viewer_id, accept);

        self.status(viewer_id, row.counterpart_of(&viewer_id)).await
    }

    pub async fn unfriend(
        &self,
        viewer_id: Uuid,
        relationship_id: Uuid,
    ) -> Result<RelationshipView, error::SystemError> {
        let row = self.load_for(&viewer_id, &relationship_id).await?;
        guard(&viewer_id, &row, RelationshipAction::Unfriend)?;

        if !self
            .relationship_repo
            .delete_in_state(&relationship_id, RelationshipState::Accepted)
            .await?
        {
            return Err(self.explain_lost_race(&relationship_id).await);
        }
        info!("Relationship {} removed by {}", relationship_id, viewer_id);

        self.status(viewer_id, row.counterpart_of(&viewer_id)).await
    }

    /// Accepted counterparties of `user_id`, in the order the store returns them.
    pub async fn friends_of(&self, user_id: Uuid) -> Result<Vec<ProfileSummary>, error::SystemError> {
        let rows = self.relationship_repo.find_accepted_for(&user_id).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let friend_ids: Vec<Uuid> = rows.iter().map(|r| r.counterpart_of(&user_id)).collect();
        let mut profiles = index_profiles(self.profile_repo.find_by_ids(&friend_ids).await?);

        Ok(friend_ids.iter().filter_map(|id| profiles.remove(id)).collect())
    }

    /// Friends of `viewer_id` whose name matches `query`, for tagging.
    pub async fn tag_suggestions(
        &self,
        viewer_id: Uuid,
        query: &str,
    ) -> Result<Vec<ProfileSummary>, error::SystemError> {
        let trimmed = query.trim();
        if trimmed.chars().count() < TAG_SUGGESTION_MIN_QUERY {
            return Ok(Vec::new());
        }

        let friend_ids: Vec<Uuid> = self
            .relationship_repo
            .find_accepted_for(&viewer_id)
            .await?
            .iter()
            .map(|r| r.counterpart_of(&viewer_id))
            .collect();
        if friend_ids.is_empty() {
            return Ok(Vec::new());
        }

        let matches =
            self.profile_repo.search_by_name(&friend_ids, trimmed, TAG_SUGGESTION_LIMIT).await?;
        Ok(matches.into_iter().map(ProfileSummary::from).collect())
    }

    async fn load_for(
        &self,
        viewer_id: &Uuid,
        relationship_id: &Uuid,
    ) -> Result<RelationshipEntity, error::SystemError> {
        let row = self
            .relationship_repo
            .find_by_id(relationship_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Relationship not found"))?;

        if !row.involves(viewer_id) {
            return Err(error::SystemError::forbidden("You are not part of this relationship"));
        }

        Ok(row)
    }

    /// A conditional write touched no row: tell a vanished row from one the
    /// other side already moved.
    async fn explain_lost_race(&self, relationship_id: &Uuid) -> error::SystemError {
        match self.relationship_repo.find_by_id(relationship_id).await {
            Ok(None) => error::SystemError::not_found("Relationship not found"),
            Ok(Some(_)) => {
                error::SystemError::already_resolved("Relationship was changed by the other user")
            }
            Err(e) => e,
        }
    }
}

fn guard(
    viewer_id: &Uuid,
    row: &RelationshipEntity,
    action: RelationshipAction,
) -> Result<RelationshipStatus, error::SystemError> {
    let answers_request = matches!(
        action,
        RelationshipAction::CancelRequest | RelationshipAction::Accept | RelationshipAction::Reject
    );
    if answers_request && row.status != RelationshipState::Pending {
        return Err(error::SystemError::already_resolved("Friend request was already answered"));
    }

    let current = derive_status(viewer_id, &row.counterpart_of(viewer_id), Some(row));
    transition(current, action)
}
