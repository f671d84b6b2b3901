use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::COMMON_MOODS,
    modules::{post::schema::PostEntity, profile::model::ProfileSummary},
};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostModel {
    #[serde(default)]
    #[validate(length(max = 5000, message = "Content must be at most 5000 characters"))]
    pub content: String,
    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 photos per post"))]
    pub photos: Vec<String>,
    #[validate(length(max = 120))]
    pub location: Option<String>,
    #[validate(length(max = 80))]
    pub mood: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50, message = "At most 50 people can be tagged"))]
    pub tagged_user_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentModel {
    #[validate(length(min = 1, max = 2000, message = "Comment must be between 1 and 2000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VisibilityBody {
    pub hidden: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedQuery {
    #[validate(length(max = 80))]
    pub mood: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MoodQuery {
    #[validate(length(max = 80))]
    pub q: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub photos: Vec<String>,
    pub location: Option<String>,
    pub mood: Option<String>,
    pub tagged_user_ids: Vec<Uuid>,
    pub tagged_user_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author: Option<ProfileSummary>,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub photos: Vec<String>,
    pub location: Option<String>,
    pub mood: Option<String>,
    pub tagged_user_ids: Vec<Uuid>,
    pub tagged_user_names: Vec<String>,
    pub hidden: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PostResponse {
    pub fn new(post: PostEntity, author: Option<ProfileSummary>) -> Self {
        PostResponse {
            id: post.id,
            author_id: post.author_id,
            author,
            parent_id: post.parent_id,
            content: post.content,
            photos: post.photos,
            location: post.location,
            mood: post.mood,
            tagged_user_ids: post.tagged_user_ids,
            tagged_user_names: post.tagged_user_names,
            hidden: post.hidden.unwrap_or(false),
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeSummary {
    pub count: i64,
    pub liked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveState {
    pub saved: bool,
}

/// Trims and drops empty strings.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn filter_moods(query: Option<&str>) -> Vec<&'static str> {
    let needle = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
    if needle.is_empty() {
        return COMMON_MOODS.to_vec();
    }
    COMMON_MOODS.iter().copied().filter(|m| m.to_lowercase().contains(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moods_filter_is_case_insensitive() {
        assert_eq!(filter_moods(None).len(), COMMON_MOODS.len());
        assert_eq!(filter_moods(Some("  ")).len(), COMMON_MOODS.len());
        assert_eq!(filter_moods(Some("MUSIC")), vec!["listening to music 🎧"]);
        assert!(filter_moods(Some("bored")).is_empty());
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  Porto ".into())).as_deref(), Some("Porto"));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
