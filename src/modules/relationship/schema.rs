use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "relationship_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RelationshipState {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RelationshipEntity {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub addressee_id: Uuid,
    pub status: RelationshipState,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub responded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl RelationshipEntity {
    pub fn involves(&self, user_id: &Uuid) -> bool {
        self.requester_id == *user_id || self.addressee_id == *user_id
    }

    /// The participant that is not `user_id`.
    pub fn counterpart_of(&self, user_id: &Uuid) -> Uuid {
        if self.requester_id == *user_id {
            self.addressee_id
        } else {
            self.requester_id
        }
    }
}
