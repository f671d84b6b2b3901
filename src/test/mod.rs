//! In-memory stores for service tests. Every call yields once before touching
//! its data so concurrent futures interleave the way they would against a
//! real database.
#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};
use tokio::task::yield_now;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        notification::{
            model::NewNotification,
            repository::NotificationRepository,
            schema::{NotificationEntity, NotificationKind},
        },
        post::{
            model::NewPost,
            repository::{LikeRepository, PostRepository, SavedPostRepository},
            schema::PostEntity,
        },
        profile::{model::UpdateProfile, repository::ProfileRepository, schema::ProfileEntity},
        relationship::{
            repository::RelationshipRepository,
            schema::{RelationshipEntity, RelationshipState},
        },
    },
};

#[derive(Default)]
pub struct MemoryProfiles {
    rows: Mutex<Vec<ProfileEntity>>,
}

impl MemoryProfiles {
    pub fn add(&self, name: &str) -> Uuid {
        let id = Uuid::now_v7();
        self.rows.lock().unwrap().push(ProfileEntity {
            id,
            name: Some(name.to_string()),
            avatar: None,
            cover: None,
            place: None,
            about: None,
            created_at: chrono::Utc::now(),
        });
        id
    }
}

#[async_trait::async_trait]
impl ProfileRepository for MemoryProfiles {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ProfileEntity>, error::SystemError> {
        yield_now().await;
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == *id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ProfileEntity>, error::SystemError> {
        yield_now().await;
        Ok(self.rows.lock().unwrap().iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }

    async fn update(
        &self,
        id: &Uuid,
        profile: &UpdateProfile,
    ) -> Result<Option<ProfileEntity>, error::SystemError> {
        yield_now().await;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|p| p.id == *id) else {
            return Ok(None);
        };
        if let Some(name) = &profile.name {
            row.name = Some(name.clone());
        }
        if let Some(place) = &profile.place {
            row.place = Some(place.clone());
        }
        if let Some(about) = &profile.about {
            row.about = Some(about.clone());
        }
        Ok(Some(row.clone()))
    }

    async fn search_by_name(
        &self,
        ids: &[Uuid],
        query: &str,
        limit: i64,
    ) -> Result<Vec<ProfileEntity>, error::SystemError> {
        yield_now().await;
        let needle = query.to_lowercase();
        let mut found: Vec<ProfileEntity> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| ids.contains(&p.id))
            .filter(|p| p.name.as_deref().is_some_and(|n| n.to_lowercase().contains(&needle)))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found.truncate(limit as usize);
        Ok(found)
    }
}

#[derive(Default)]
pub struct MemoryRelationships {
    rows: Mutex<Vec<RelationshipEntity>>,
    failing_writes: AtomicBool,
}

impl MemoryRelationships {
    /// Every later write fails as if the database were down. Reads still work.
    pub fn fail_writes(&self) {
        self.failing_writes.store(true, Ordering::SeqCst);
    }

    pub fn restore_writes(&self) {
        self.failing_writes.store(false, Ordering::SeqCst);
    }

    /// Stores `row` as is, bypassing the pair check.
    pub fn insert_row(&self, row: RelationshipEntity) {
        self.rows.lock().unwrap().push(row);
    }

    fn check_write(&self) -> Result<(), error::SystemError> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(error::SystemError::StoreUnavailable("connection refused".into()));
        }
        Ok(())
    }

    pub fn count_between(&self, a: &Uuid, b: &Uuid) -> usize {
        self.rows.lock().unwrap().iter().filter(|r| r.involves(a) && r.involves(b)).count()
    }

    pub fn snapshot(&self) -> Vec<RelationshipEntity> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RelationshipRepository for MemoryRelationships {
    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<RelationshipEntity>, error::SystemError> {
        yield_now().await;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.involves(user_id_a) && r.involves(user_id_b))
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<RelationshipEntity>, error::SystemError> {
        yield_now().await;
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == *id).cloned())
    }

    async fn create_request(
        &self,
        requester_id: &Uuid,
        addressee_id: &Uuid,
    ) -> Result<RelationshipEntity, error::SystemError> {
        yield_now().await;
        self.check_write()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.involves(requester_id) && r.involves(addressee_id)) {
            return Err(error::SystemError::conflict());
        }
        let row = RelationshipEntity {
            id: Uuid::now_v7(),
            requester_id: *requester_id,
            addressee_id: *addressee_id,
            status: RelationshipState::Pending,
            created_at: chrono::Utc::now(),
            responded_at: None,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn resolve_pending(
        &self,
        id: &Uuid,
        state: RelationshipState,
        responded_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<RelationshipEntity>, error::SystemError> {
        yield_now().await;
        self.check_write()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) =
            rows.iter_mut().find(|r| r.id == *id && r.status == RelationshipState::Pending)
        else {
            return Ok(None);
        };
        row.status = state;
        row.responded_at = Some(responded_at);
        Ok(Some(row.clone()))
    }

    async fn delete_in_state(
        &self,
        id: &Uuid,
        state: RelationshipState,
    ) -> Result<bool, error::SystemError> {
        yield_now().await;
        self.check_write()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.id == *id && r.status == state));
        Ok(rows.len() != before)
    }

    async fn find_pending_to(
        &self,
        addressee_id: &Uuid,
    ) -> Result<Vec<RelationshipEntity>, error::SystemError> {
        yield_now().await;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.addressee_id == *addressee_id && r.status == RelationshipState::Pending)
            .cloned()
            .collect())
    }

    async fn find_accepted_for(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<RelationshipEntity>, error::SystemError> {
        yield_now().await;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.involves(user_id) && r.status == RelationshipState::Accepted)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryNotifications {
    rows: Mutex<Vec<NotificationEntity>>,
    batches: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryNotifications {
    /// Every later `insert_many` fails as if the database were down.
    pub fn fail_inserts(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, id: &Uuid) -> Option<NotificationEntity> {
        self.rows.lock().unwrap().iter().find(|n| n.id == *id).cloned()
    }
}

#[async_trait::async_trait]
impl NotificationRepository for MemoryNotifications {
    async fn insert_many(&self, rows: &[NewNotification]) -> Result<u64, error::SystemError> {
        yield_now().await;
        if self.failing.load(Ordering::SeqCst) {
            return Err(error::SystemError::StoreUnavailable("connection refused".into()));
        }
        self.batches.fetch_add(1, Ordering::SeqCst);
        let now = chrono::Utc::now();
        let mut stored = self.rows.lock().unwrap();
        stored.extend(rows.iter().map(|n| NotificationEntity {
            id: Uuid::now_v7(),
            recipient_id: n.recipient_id,
            actor_id: n.actor_id,
            post_id: n.post_id,
            kind: n.kind,
            payload: sqlx::types::Json(n.payload.clone()),
            read: false,
            created_at: now,
        }));
        Ok(rows.len() as u64)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError> {
        yield_now().await;
        Ok(self.get(id))
    }

    async fn mark_read(
        &self,
        id: &Uuid,
    ) -> Result<Option<NotificationEntity>, error::SystemError> {
        yield_now().await;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|n| n.id == *id) else {
            return Ok(None);
        };
        row.read = true;
        Ok(Some(row.clone()))
    }

    async fn find_unread_for(
        &self,
        recipient_id: &Uuid,
        kind: NotificationKind,
    ) -> Result<Vec<NotificationEntity>, error::SystemError> {
        yield_now().await;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|n| n.recipient_id == *recipient_id && n.kind == kind && !n.read)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryPosts {
    rows: Mutex<Vec<PostEntity>>,
}

impl MemoryPosts {
    /// Newest first. Hidden posts are returned to everyone; visibility is
    /// left to the service.
    fn select(&self, keep: impl Fn(&PostEntity) -> bool) -> Vec<PostEntity> {
        self.rows.lock().unwrap().iter().rev().filter(|p| keep(p)).cloned().collect()
    }
}

#[async_trait::async_trait]
impl PostRepository for MemoryPosts {
    async fn create(&self, post: &NewPost) -> Result<PostEntity, error::SystemError> {
        yield_now().await;
        let row = PostEntity {
            id: Uuid::now_v7(),
            author_id: post.author_id,
            parent_id: post.parent_id,
            content: post.content.clone(),
            photos: post.photos.clone(),
            location: post.location.clone(),
            mood: post.mood.clone(),
            tagged_user_ids: post.tagged_user_ids.clone(),
            tagged_user_names: post.tagged_user_names.clone(),
            hidden: Some(false),
            created_at: chrono::Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PostEntity>, error::SystemError> {
        yield_now().await;
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == *id).cloned())
    }

    async fn find_feed(
        &self,
        _viewer_id: &Uuid,
        mood: Option<&str>,
        limit: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        yield_now().await;
        let needle = mood.map(str::to_lowercase);
        let mut posts = self.select(|p| {
            p.parent_id.is_none()
                && needle.as_deref().map_or(true, |n| {
                    p.mood.as_deref().is_some_and(|m| m.to_lowercase().contains(n))
                })
        });
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn find_by_author(
        &self,
        _viewer_id: &Uuid,
        author_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        yield_now().await;
        let mut posts =
            self.select(|p| p.author_id == *author_id && p.parent_id.is_none());
        posts.truncate(limit as usize);
        Ok(posts)
    }

    async fn find_by_ids(
        &self,
        _viewer_id: &Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        yield_now().await;
        Ok(self.select(|p| ids.contains(&p.id)))
    }

    async fn find_comments(
        &self,
        _viewer_id: &Uuid,
        parent_id: &Uuid,
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        yield_now().await;
        let mut comments = self.select(|p| p.parent_id == Some(*parent_id));
        comments.reverse();
        Ok(comments)
    }

    async fn set_hidden(
        &self,
        id: &Uuid,
        hidden: bool,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        yield_now().await;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|p| p.id == *id) else {
            return Ok(None);
        };
        row.hidden = Some(hidden);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        yield_now().await;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != *id && p.parent_id != Some(*id));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryLikes {
    rows: Mutex<HashSet<(Uuid, Uuid)>>,
}

#[async_trait::async_trait]
impl LikeRepository for MemoryLikes {
    async fn count(&self, post_id: &Uuid) -> Result<i64, error::SystemError> {
        yield_now().await;
        Ok(self.rows.lock().unwrap().iter().filter(|(p, _)| p == post_id).count() as i64)
    }

    async fn exists(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError> {
        yield_now().await;
        Ok(self.rows.lock().unwrap().contains(&(*post_id, *user_id)))
    }

    async fn insert(&self, post_id: &Uuid, user_id: &Uuid) -> Result<(), error::SystemError> {
        yield_now().await;
        if !self.rows.lock().unwrap().insert((*post_id, *user_id)) {
            return Err(error::SystemError::conflict());
        }
        Ok(())
    }

    async fn delete(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError> {
        yield_now().await;
        Ok(self.rows.lock().unwrap().remove(&(*post_id, *user_id)))
    }
}

/// Kept in save order so `find_post_ids` can return most recent first.
#[derive(Default)]
pub struct MemorySavedPosts {
    rows: Mutex<Vec<(Uuid, Uuid)>>,
}

#[async_trait::async_trait]
impl SavedPostRepository for MemorySavedPosts {
    async fn exists(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError> {
        yield_now().await;
        Ok(self.rows.lock().unwrap().contains(&(*post_id, *user_id)))
    }

    async fn insert(&self, post_id: &Uuid, user_id: &Uuid) -> Result<(), error::SystemError> {
        yield_now().await;
        let mut rows = self.rows.lock().unwrap();
        if rows.contains(&(*post_id, *user_id)) {
            return Err(error::SystemError::conflict());
        }
        rows.push((*post_id, *user_id));
        Ok(())
    }

    async fn delete(&self, post_id: &Uuid, user_id: &Uuid) -> Result<bool, error::SystemError> {
        yield_now().await;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| *row != (*post_id, *user_id));
        Ok(rows.len() != before)
    }

    async fn find_post_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        yield_now().await;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|(_, u)| u == user_id)
            .map(|(p, _)| *p)
            .collect())
    }
}
