use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::error,
    modules::relationship::schema::{RelationshipEntity, RelationshipState},
};

/// How `viewer` stands towards `subject`. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStatus {
    #[serde(rename = "self")]
    Myself,
    #[serde(rename = "none")]
    Unrelated,
    Outgoing,
    Incoming,
    Friends,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipAction {
    SendRequest,
    CancelRequest,
    Accept,
    Reject,
    Unfriend,
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationshipStatus::Myself => "self",
            RelationshipStatus::Unrelated => "none",
            RelationshipStatus::Outgoing => "outgoing",
            RelationshipStatus::Incoming => "incoming",
            RelationshipStatus::Friends => "friends",
        };
        f.write_str(name)
    }
}

impl fmt::Display for RelationshipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationshipAction::SendRequest => "send a friend request",
            RelationshipAction::CancelRequest => "cancel the friend request",
            RelationshipAction::Accept => "accept the friend request",
            RelationshipAction::Reject => "reject the friend request",
            RelationshipAction::Unfriend => "unfriend",
        };
        f.write_str(name)
    }
}

/// Total over every input. A stored `rejected` row is about to be deleted
/// and already reads as `none`.
pub fn derive_status(
    viewer_id: &Uuid,
    subject_id: &Uuid,
    row: Option<&RelationshipEntity>,
) -> RelationshipStatus {
    if viewer_id == subject_id {
        return RelationshipStatus::Myself;
    }

    match row {
        None => RelationshipStatus::Unrelated,
        Some(r) => match r.status {
            RelationshipState::Accepted => RelationshipStatus::Friends,
            RelationshipState::Pending if r.requester_id == *viewer_id => {
                RelationshipStatus::Outgoing
            }
            RelationshipState::Pending => RelationshipStatus::Incoming,
            RelationshipState::Rejected => RelationshipStatus::Unrelated,
        },
    }
}

/// The transition table. Returns the viewer's status after `action`.
pub fn transition(
    from: RelationshipStatus,
    action: RelationshipAction,
) -> Result<RelationshipStatus, error::SystemError> {
    use RelationshipAction as A;
    use RelationshipStatus as S;

    match (from, action) {
        (S::Unrelated, A::SendRequest) => Ok(S::Outgoing),
        (S::Outgoing, A::CancelRequest) => Ok(S::Unrelated),
        (S::Incoming, A::Accept) => Ok(S::Friends),
        (S::Incoming, A::Reject) => Ok(S::Unrelated),
        (S::Friends, A::Unfriend) => Ok(S::Unrelated),
        (from, action) => {
            Err(error::SystemError::invalid_transition(format!("Cannot {action} while {from}")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipView {
    pub status: RelationshipStatus,
    pub relationship: Option<RelationshipEntity>,
}

impl RelationshipView {
    pub fn derive(viewer_id: &Uuid, subject_id: &Uuid, row: Option<RelationshipEntity>) -> Self {
        let status = derive_status(viewer_id, subject_id, row.as_ref());
        let relationship = match status {
            RelationshipStatus::Myself | RelationshipStatus::Unrelated => None,
            _ => row,
        };
        RelationshipView { status, relationship }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestBody {
    pub addressee_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RespondBody {
    pub accept: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SuggestionQuery {
    #[validate(length(max = 80))]
    pub q: String,
}
