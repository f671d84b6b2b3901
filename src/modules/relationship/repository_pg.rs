use uuid::Uuid;

use crate::{
    api::error,
    modules::relationship::{
        repository::RelationshipRepository,
        schema::{RelationshipEntity, RelationshipState},
    },
};

#[derive(Clone)]
pub struct RelationshipRepositoryPg {
    pool: sqlx::PgPool,
}

impl RelationshipRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RelationshipRepository for RelationshipRepositoryPg {
    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<RelationshipEntity>, error::SystemError> {
        let relationship = sqlx::query_as::<_, RelationshipEntity>(
            r#"
            SELECT *
            FROM relationships
            WHERE
                (requester_id = $1 AND addressee_id = $2)
             OR (requester_id = $2 AND addressee_id = $1)
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(relationship)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<RelationshipEntity>, error::SystemError> {
        let relationship =
            sqlx::query_as::<_, RelationshipEntity>("SELECT * FROM relationships WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(relationship)
    }

    async fn create_request(
        &self,
        requester_id: &Uuid,
        addressee_id: &Uuid,
    ) -> Result<RelationshipEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let relationship = sqlx::query_as::<_, RelationshipEntity>(
            r#"
            INSERT INTO relationships (id, requester_id, addressee_id, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(requester_id)
        .bind(addressee_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(relationship)
    }

    async fn resolve_pending(
        &self,
        id: &Uuid,
        state: RelationshipState,
        responded_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<RelationshipEntity>, error::SystemError> {
        let relationship = sqlx::query_as::<_, RelationshipEntity>(
            r#"
            UPDATE relationships
            SET status = $2, responded_at = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(state)
        .bind(responded_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(relationship)
    }

    async fn delete_in_state(
        &self,
        id: &Uuid,
        state: RelationshipState,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM relationships WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(state)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    async fn find_pending_to(
        &self,
        addressee_id: &Uuid,
    ) -> Result<Vec<RelationshipEntity>, error::SystemError> {
        let rows = sqlx::query_as::<_, RelationshipEntity>(
            r#"
            SELECT *
            FROM relationships
            WHERE addressee_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "#,
        )
        .bind(addressee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_accepted_for(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<RelationshipEntity>, error::SystemError> {
        let rows = sqlx::query_as::<_, RelationshipEntity>(
            r#"
            SELECT *
            FROM relationships
            WHERE status = 'accepted'
              AND (requester_id = $1 OR addressee_id = $1)
            ORDER BY responded_at DESC NULLS LAST
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
