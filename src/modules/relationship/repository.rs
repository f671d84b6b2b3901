use uuid::Uuid;

use crate::{
    api::error,
    modules::relationship::schema::{RelationshipEntity, RelationshipState},
};

#[async_trait::async_trait]
pub trait RelationshipRepository {
    /// The row for the unordered pair, whichever side requested.
    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<RelationshipEntity>, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid)
    -> Result<Option<RelationshipEntity>, error::SystemError>;

    /// Fails with `Conflict` when the pair already has a row.
    async fn create_request(
        &self,
        requester_id: &Uuid,
        addressee_id: &Uuid,
    ) -> Result<RelationshipEntity, error::SystemError>;

    /// Moves a `pending` row to `state`. `None` when the row is gone or no
    /// longer pending.
    async fn resolve_pending(
        &self,
        id: &Uuid,
        state: RelationshipState,
        responded_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<RelationshipEntity>, error::SystemError>;

    /// Deletes the row only while it is in `state`. Returns whether a row went.
    async fn delete_in_state(
        &self,
        id: &Uuid,
        state: RelationshipState,
    ) -> Result<bool, error::SystemError>;

    async fn find_pending_to(
        &self,
        addressee_id: &Uuid,
    ) -> Result<Vec<RelationshipEntity>, error::SystemError>;

    async fn find_accepted_for(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<RelationshipEntity>, error::SystemError>;
}
