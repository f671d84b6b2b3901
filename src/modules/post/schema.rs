use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PostEntity {
    pub id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub photos: Vec<String>,
    pub location: Option<String>,
    pub mood: Option<String>,
    pub tagged_user_ids: Vec<Uuid>,
    pub tagged_user_names: Vec<String>,
    pub hidden: Option<bool>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PostEntity {
    /// The one visibility rule: hidden posts are seen only by their author.
    pub fn is_visible_to(&self, viewer_id: &Uuid) -> bool {
        !self.hidden.unwrap_or(false) || self.author_id == *viewer_id
    }
}

pub fn retain_visible(mut posts: Vec<PostEntity>, viewer_id: &Uuid) -> Vec<PostEntity> {
    posts.retain(|p| p.is_visible_to(viewer_id));
    posts
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SavedPostEntity {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(author_id: Uuid, hidden: Option<bool>) -> PostEntity {
        PostEntity {
            id: Uuid::now_v7(),
            author_id,
            parent_id: None,
            content: "hi".into(),
            photos: Vec::new(),
            location: None,
            mood: None,
            tagged_user_ids: Vec::new(),
            tagged_user_names: Vec::new(),
            hidden,
            created_at: chrono::Utc::now(),
        }
    }

    // Same table as `hidden IS NOT TRUE OR author_id = $1`, where NULL is not true.
    #[test]
    fn visibility_matches_the_sql_filter() {
        let author = Uuid::now_v7();
        let other = Uuid::now_v7();

        for (hidden, visible_to_other) in [(None, true), (Some(false), true), (Some(true), false)] {
            let p = post(author, hidden);
            assert!(p.is_visible_to(&author));
            assert_eq!(p.is_visible_to(&other), visible_to_other, "hidden = {hidden:?}");
        }
    }

    #[test]
    fn retain_visible_keeps_order() {
        let author = Uuid::now_v7();
        let viewer = Uuid::now_v7();
        let posts = vec![post(author, None), post(author, Some(true)), post(viewer, Some(true))];
        let ids: Vec<Uuid> = vec![posts[0].id, posts[2].id];

        let kept = retain_visible(posts, &viewer);
        assert_eq!(kept.iter().map(|p| p.id).collect::<Vec<_>>(), ids);
    }
}
