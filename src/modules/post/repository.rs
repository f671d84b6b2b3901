use uuid::Uuid;

use crate::{
    api::error,
    modules::post::{model::NewPost, schema::PostEntity},
};

/// Listing methods take the viewer so the store can pre-filter hidden
/// posts. Callers still apply `PostEntity::is_visible_to`.
#[async_trait::async_trait]
pub trait PostRepository {
    async fn create(&self, post: &NewPost) -> Result<PostEntity, error::SystemError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PostEntity>, error::SystemError>;

    /// Top-level posts, newest first.
    async fn find_feed(
        &self,
        viewer_id: &Uuid,
        mood: Option<&str>,
        limit: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError>;

    async fn find_by_author(
        &self,
        viewer_id: &Uuid,
        author_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError>;

    async fn find_by_ids(
        &self,
        viewer_id: &Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<PostEntity>, error::SystemError>;

    /// Oldest first.
    async fn find_comments(
        &self,
        viewer_id: &Uuid,
        parent_id: &Uuid,
    ) -> Result<Vec<PostEntity>, error::SystemError>;

    async fn set_hidden(
        &self,
        id: &Uuid,
        hidden: bool,
    ) -> Result<Option<PostEntity>, error::SystemError>;

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait LikeRepository {
    async fn count(&self, post_id: &Uuid) -> Result<i64, error::SystemError>;

    async fn exists(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError>;

    async fn insert(&self, post_id: &Uuid, user_id: &Uuid) -> Result<(), error::SystemError>;

    async fn delete(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait SavedPostRepository {
    async fn exists(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError>;

    async fn insert(&self, post_id: &Uuid, user_id: &Uuid) -> Result<(), error::SystemError>;

    async fn delete(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError>;

    /// Most recently saved first.
    async fn find_post_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;
}
