use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        notification::{
            model::{TagContext, TagTarget},
            service::NotificationService,
        },
        post::{
            model::{
                filter_moods, non_blank, CreatePostModel, LikeSummary, NewPost, PostResponse,
                SaveState,
            },
            repository::{LikeRepository, PostRepository, SavedPostRepository},
            schema::{retain_visible, PostEntity},
        },
        profile::{model::index_profiles, repository::ProfileRepository},
    },
};

/// A committed post plus the detached tag dispatch it started, if any.
/// Dropping the handle leaves the dispatch running.
#[derive(Debug)]
pub struct CreatedPost {
    pub post: PostResponse,
    pub dispatch: Option<JoinHandle<()>>,
}

#[derive(Clone)]
pub struct PostService {
    post_repo: Arc<dyn PostRepository + Send + Sync>,
    like_repo: Arc<dyn LikeRepository + Send + Sync>,
    saved_repo: Arc<dyn SavedPostRepository + Send + Sync>,
    profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
    notifier: NotificationService,
    feed_limit: i64,
}

impl PostService {
    pub fn with_dependencies(
        post_repo: Arc<dyn PostRepository + Send + Sync>,
        like_repo: Arc<dyn LikeRepository + Send + Sync>,
        saved_repo: Arc<dyn SavedPostRepository + Send + Sync>,
        profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
        notifier: NotificationService,
        feed_limit: i64,
    ) -> Self {
        PostService { post_repo, like_repo, saved_repo, profile_repo, notifier, feed_limit }
    }

    /// Commits the post, then hands tagging to a detached dispatch. The
    /// dispatch outcome never reaches the caller.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        input: CreatePostModel,
    ) -> Result<CreatedPost, error::SystemError> {
        let content = input.content.trim().to_string();
        if content.is_empty() && input.photos.is_empty() {
            return Err(error::SystemError::bad_request("Post cannot be empty"));
        }

        let location = non_blank(input.location);
        let mood = non_blank(input.mood);
        let targets = self.resolve_tags(&input.tagged_user_ids).await?;

        let post = self
            .post_repo
            .create(&NewPost {
                author_id,
                parent_id: None,
                content,
                photos: input.photos,
                location: location.clone(),
                mood: mood.clone(),
                tagged_user_ids: targets.iter().map(|t| t.id).collect(),
                tagged_user_names: targets
                    .iter()
                    .map(|t| t.name.clone().unwrap_or_default())
                    .collect(),
            })
            .await?;

        let dispatch = if targets.is_empty() {
            None
        } else {
            Some(self.notifier.spawn_tag_dispatch(
                post.id,
                author_id,
                targets,
                TagContext { mood, location },
            ))
        };

        let post = self.enrich_one(post).await?;
        Ok(CreatedPost { post, dispatch })
    }

    pub async fn feed(
        &self,
        viewer_id: Uuid,
        mood: Option<String>,
    ) -> Result<Vec<PostResponse>, error::SystemError> {
        let mood = non_blank(mood);
        let posts = self.post_repo.find_feed(&viewer_id, mood.as_deref(), self.feed_limit).await?;
        self.enrich(retain_visible(posts, &viewer_id)).await
    }

    pub async fn profile_posts(
        &self,
        viewer_id: Uuid,
        author_id: Uuid,
    ) -> Result<Vec<PostResponse>, error::SystemError> {
        let posts =
            self.post_repo.find_by_author(&viewer_id, &author_id, self.feed_limit).await?;
        self.enrich(retain_visible(posts, &viewer_id)).await
    }

    pub async fn profile_photos(
        &self,
        viewer_id: Uuid,
        author_id: Uuid,
    ) -> Result<Vec<String>, error::SystemError> {
        let posts =
            self.post_repo.find_by_author(&viewer_id, &author_id, self.feed_limit).await?;
        Ok(retain_visible(posts, &viewer_id).into_iter().flat_map(|p| p.photos).collect())
    }

    pub async fn get_post(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
    ) -> Result<PostResponse, error::SystemError> {
        let post = self.visible_post(&viewer_id, &post_id).await?;
        self.enrich_one(post).await
    }

    pub async fn saved_posts(&self, viewer_id: Uuid) -> Result<Vec<PostResponse>, error::SystemError> {
        let ids = self.saved_repo.find_post_ids(&viewer_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut posts = retain_visible(self.post_repo.find_by_ids(&viewer_id, &ids).await?, &viewer_id);
        posts.sort_by_key(|p| ids.iter().position(|id| *id == p.id));
        self.enrich(posts).await
    }

    pub async fn comments(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
    ) -> Result<Vec<PostResponse>, error::SystemError> {
        self.visible_post(&viewer_id, &post_id).await?;
        let comments = self.post_repo.find_comments(&viewer_id, &post_id).await?;
        self.enrich(retain_visible(comments, &viewer_id)).await
    }

    pub async fn add_comment(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
        content: String,
    ) -> Result<PostResponse, error::SystemError> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Comment cannot be empty"));
        }
        self.visible_post(&viewer_id, &post_id).await?;

        let comment = self
            .post_repo
            .create(&NewPost {
                author_id: viewer_id,
                parent_id: Some(post_id),
                content,
                photos: Vec::new(),
                location: None,
                mood: None,
                tagged_user_ids: Vec::new(),
                tagged_user_names: Vec::new(),
            })
            .await?;
        self.enrich_one(comment).await
    }

    pub async fn set_hidden(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
        hidden: bool,
    ) -> Result<PostResponse, error::SystemError> {
        self.owned_post(&viewer_id, &post_id).await?;
        let post = self
            .post_repo
            .set_hidden(&post_id, hidden)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;
        self.enrich_one(post).await
    }

    pub async fn delete_post(&self, viewer_id: Uuid, post_id: Uuid) -> Result<(), error::SystemError> {
        self.owned_post(&viewer_id, &post_id).await?;
        if !self.post_repo.delete(&post_id).await? {
            return Err(error::SystemError::not_found("Post not found"));
        }
        Ok(())
    }

    pub async fn like_summary(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
    ) -> Result<LikeSummary, error::SystemError> {
        self.visible_post(&viewer_id, &post_id).await?;
        self.read_likes(&viewer_id, &post_id).await
    }

    pub async fn toggle_like(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
    ) -> Result<LikeSummary, error::SystemError> {
        self.visible_post(&viewer_id, &post_id).await?;
        if self.like_repo.exists(&post_id, &viewer_id).await? {
            self.like_repo.delete(&post_id, &viewer_id).await?;
        } else {
            self.like_repo.insert(&post_id, &viewer_id).await?;
        }
        self.read_likes(&viewer_id, &post_id).await
    }

    pub async fn toggle_save(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
    ) -> Result<SaveState, error::SystemError> {
        self.visible_post(&viewer_id, &post_id).await?;
        if self.saved_repo.exists(&post_id, &viewer_id).await? {
            self.saved_repo.delete(&post_id, &viewer_id).await?;
        } else {
            self.saved_repo.insert(&post_id, &viewer_id).await?;
        }
        let saved = self.saved_repo.exists(&post_id, &viewer_id).await?;
        Ok(SaveState { saved })
    }

    pub fn moods(&self, query: Option<&str>) -> Vec<&'static str> {
        filter_moods(query)
    }

    async fn read_likes(
        &self,
        viewer_id: &Uuid,
        post_id: &Uuid,
    ) -> Result<LikeSummary, error::SystemError> {
        let (count, liked) = tokio::try_join!(
            self.like_repo.count(post_id),
            self.like_repo.exists(post_id, viewer_id)
        )?;
        Ok(LikeSummary { count, liked })
    }

    /// Unknown and hidden-from-viewer posts are indistinguishable.
    async fn visible_post(
        &self,
        viewer_id: &Uuid,
        post_id: &Uuid,
    ) -> Result<PostEntity, error::SystemError> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .filter(|p| p.is_visible_to(viewer_id))
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    async fn owned_post(
        &self,
        viewer_id: &Uuid,
        post_id: &Uuid,
    ) -> Result<PostEntity, error::SystemError> {
        let post = self.visible_post(viewer_id, post_id).await?;
        if post.author_id != *viewer_id {
            return Err(error::SystemError::forbidden("Only the author can change this post"));
        }
        Ok(post)
    }

    /// Known profiles among `ids`, first-seen order, duplicates dropped.
    async fn resolve_tags(&self, ids: &[Uuid]) -> Result<Vec<TagTarget>, error::SystemError> {
        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<Uuid> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let mut profiles = index_profiles(self.profile_repo.find_by_ids(&unique).await?);
        Ok(unique
            .into_iter()
            .filter_map(|id| profiles.remove(&id).map(|p| TagTarget { id, name: p.name }))
            .collect())
    }

    async fn enrich_one(&self, post: PostEntity) -> Result<PostResponse, error::SystemError> {
        let mut enriched = self.enrich(vec![post]).await?;
        enriched.pop().ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    async fn enrich(&self, posts: Vec<PostEntity>) -> Result<Vec<PostResponse>, error::SystemError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = index_profiles(self.profile_repo.find_by_ids(&author_ids).await?);

        Ok(posts
            .into_iter()
            .map(|p| {
                let author = authors.get(&p.author_id).cloned();
                PostResponse::new(p, author)
            })
            .collect())
    }
}
