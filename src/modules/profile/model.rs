use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::modules::profile::schema::ProfileEntity;

/// Display attributes joined onto posts, requests and notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub place: Option<String>,
}

impl From<ProfileEntity> for ProfileSummary {
    fn from(profile: ProfileEntity) -> Self {
        ProfileSummary {
            id: profile.id,
            name: profile.name,
            avatar: profile.avatar,
            place: profile.place,
        }
    }
}

/// Index of summaries by id, built from one `find_by_ids` round trip.
pub type ProfileIndex = HashMap<Uuid, ProfileSummary>;

pub fn index_profiles(profiles: Vec<ProfileEntity>) -> ProfileIndex {
    profiles.into_iter().map(|p| (p.id, ProfileSummary::from(p))).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub cover: Option<String>,
    pub place: Option<String>,
    pub about: Option<String>,
}

impl From<ProfileEntity> for ProfileResponse {
    fn from(entity: ProfileEntity) -> Self {
        ProfileResponse {
            id: entity.id,
            name: entity.name,
            avatar: entity.avatar,
            cover: entity.cover,
            place: entity.place,
            about: entity.about,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileModel {
    #[validate(length(min = 1, max = 80, message = "Name must be between 1 and 80 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 120, message = "Place must be at most 120 characters"))]
    pub place: Option<String>,
    #[validate(length(max = 2000, message = "About must be at most 2000 characters"))]
    pub about: Option<String>,
}

impl UpdateProfileModel {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.place.is_none() && self.about.is_none()
    }
}

pub struct UpdateProfile {
    pub name: Option<String>,
    pub place: Option<String>,
    pub about: Option<String>,
}
