use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        post::model::non_blank,
        profile::{
            model::{ProfileResponse, UpdateProfile, UpdateProfileModel},
            repository::ProfileRepository,
        },
    },
};

#[derive(Clone)]
pub struct ProfileService {
    profile_repo: Arc<dyn ProfileRepository + Send + Sync>,
}

impl ProfileService {
    pub fn with_dependencies(profile_repo: Arc<dyn ProfileRepository + Send + Sync>) -> Self {
        ProfileService { profile_repo }
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<ProfileResponse, error::SystemError> {
        let profile = self
            .profile_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Profile not found"))?;
        Ok(profile.into())
    }

    /// Fields left out of `input` keep their stored value.
    pub async fn update_profile(
        &self,
        id: Uuid,
        input: UpdateProfileModel,
    ) -> Result<ProfileResponse, error::SystemError> {
        if input.is_empty() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }

        let name = match input.name {
            Some(name) => Some(
                non_blank(Some(name))
                    .ok_or_else(|| error::SystemError::bad_request("Name cannot be blank"))?,
            ),
            None => None,
        };
        let update = UpdateProfile {
            name,
            place: input.place.map(|p| p.trim().to_string()),
            about: input.about.map(|a| a.trim().to_string()),
        };

        let profile = self
            .profile_repo
            .update(&id, &update)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Profile not found"))?;
        info!("Profile {} updated", id);
        Ok(profile.into())
    }
}
