use uuid::Uuid;

use crate::{
    api::error,
    modules::post::{
        model::NewPost,
        repository::{LikeRepository, PostRepository, SavedPostRepository},
        schema::{PostEntity, SavedPostEntity},
    },
    utils::like_pattern,
};

/// SQL form of `PostEntity::is_visible_to`; the viewer is always `$1`.
const VISIBLE_TO_VIEWER: &str = "(hidden IS NOT TRUE OR author_id = $1)";

#[derive(Clone)]
pub struct PostRepositoryPg {
    pool: sqlx::PgPool,
}

impl PostRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryPg {
    async fn create(&self, post: &NewPost) -> Result<PostEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let post = sqlx::query_as::<_, PostEntity>(
            r#"
            INSERT INTO posts
                (id, author_id, parent_id, content, photos, location, mood,
                 tagged_user_ids, tagged_user_names, hidden)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, false)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(post.author_id)
        .bind(post.parent_id)
        .bind(&post.content)
        .bind(&post.photos)
        .bind(&post.location)
        .bind(&post.mood)
        .bind(&post.tagged_user_ids)
        .bind(&post.tagged_user_names)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn find_feed(
        &self,
        viewer_id: &Uuid,
        mood: Option<&str>,
        limit: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT * FROM posts
            WHERE parent_id IS NULL
              AND {VISIBLE_TO_VIEWER}
              AND ($2::text IS NULL OR mood ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#
        );
        let pattern = mood.map(like_pattern);

        let posts = sqlx::query_as::<_, PostEntity>(&sql)
            .bind(viewer_id)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn find_by_author(
        &self,
        viewer_id: &Uuid,
        author_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT * FROM posts
            WHERE author_id = $2
              AND parent_id IS NULL
              AND {VISIBLE_TO_VIEWER}
            ORDER BY created_at DESC
            LIMIT $3
            "#
        );

        let posts = sqlx::query_as::<_, PostEntity>(&sql)
            .bind(viewer_id)
            .bind(author_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn find_by_ids(
        &self,
        viewer_id: &Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT * FROM posts WHERE id = ANY($2) AND {VISIBLE_TO_VIEWER} ORDER BY created_at DESC"
        );

        let posts = sqlx::query_as::<_, PostEntity>(&sql)
            .bind(viewer_id)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn find_comments(
        &self,
        viewer_id: &Uuid,
        parent_id: &Uuid,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        let sql = format!(
            "SELECT * FROM posts WHERE parent_id = $2 AND {VISIBLE_TO_VIEWER} ORDER BY created_at ASC"
        );

        let posts = sqlx::query_as::<_, PostEntity>(&sql)
            .bind(viewer_id)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn set_hidden(
        &self,
        id: &Uuid,
        hidden: bool,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>(
            "UPDATE posts SET hidden = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(hidden)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}

#[derive(Clone)]
pub struct LikeRepositoryPg {
    pool: sqlx::PgPool,
}

impl LikeRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LikeRepository for LikeRepositoryPg {
    async fn count(&self, post_id: &Uuid) -> Result<i64, error::SystemError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn exists(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, post_id: &Uuid, user_id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("INSERT INTO likes (post_id, user_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}

#[derive(Clone)]
pub struct SavedPostRepositoryPg {
    pool: sqlx::PgPool,
}

impl SavedPostRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SavedPostRepository for SavedPostRepositoryPg {
    async fn exists(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM saved_posts WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, post_id: &Uuid, user_id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("INSERT INTO saved_posts (post_id, user_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM saved_posts WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn find_post_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let rows = sqlx::query_as::<_, SavedPostEntity>(
            "SELECT * FROM saved_posts WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.post_id).collect())
    }
}
