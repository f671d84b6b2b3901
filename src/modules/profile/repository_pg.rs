use uuid::Uuid;

use crate::{
    api::error,
    modules::profile::{model::UpdateProfile, repository::ProfileRepository, schema::ProfileEntity},
    utils::like_pattern,
};

#[derive(Clone)]
pub struct ProfileRepositoryPg {
    pool: sqlx::PgPool,
}

impl ProfileRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProfileRepository for ProfileRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ProfileEntity>, error::SystemError> {
        let profile = sqlx::query_as::<_, ProfileEntity>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ProfileEntity>, error::SystemError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let profiles =
            sqlx::query_as::<_, ProfileEntity>("SELECT * FROM profiles WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;
        Ok(profiles)
    }

    async fn update(
        &self,
        id: &Uuid,
        profile: &UpdateProfile,
    ) -> Result<Option<ProfileEntity>, error::SystemError> {
        let profile = sqlx::query_as::<_, ProfileEntity>(
            r#"
            UPDATE profiles
            SET
                name  = COALESCE($2, name),
                place = COALESCE($3, place),
                about = COALESCE($4, about)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&profile.name)
        .bind(&profile.place)
        .bind(&profile.about)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn search_by_name(
        &self,
        ids: &[Uuid],
        query: &str,
        limit: i64,
    ) -> Result<Vec<ProfileEntity>, error::SystemError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = like_pattern(query);
        let profiles = sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT * FROM profiles
            WHERE id = ANY($1)
              AND name ILIKE $2
            ORDER BY name
            LIMIT $3
            "#,
        )
        .bind(ids)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }
}
