use uuid::Uuid;

use crate::{
    api::error,
    modules::profile::{model::UpdateProfile, schema::ProfileEntity},
};

#[async_trait::async_trait]
pub trait ProfileRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ProfileEntity>, error::SystemError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ProfileEntity>, error::SystemError>;

    async fn update(
        &self,
        id: &Uuid,
        profile: &UpdateProfile,
    ) -> Result<Option<ProfileEntity>, error::SystemError>;

    /// Case-insensitive substring match on name, restricted to `ids`.
    async fn search_by_name(
        &self,
        ids: &[Uuid],
        query: &str,
        limit: i64,
    ) -> Result<Vec<ProfileEntity>, error::SystemError>;
}
