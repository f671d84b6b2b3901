use actix_web::{get, patch, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        post::{model::PostResponse, service::PostService},
        profile::{
            model::{ProfileResponse, UpdateProfileModel},
            service::ProfileService,
        },
    },
    utils::ValidatedJson,
};

#[get("/me")]
pub async fn get_own_profile(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
) -> Result<success::Success<ProfileResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let profile = profile_service.get_profile(id).await?;
    Ok(success::Success::ok(Some(profile)).message("Profile retrieved successfully"))
}

#[patch("/me")]
pub async fn update_own_profile(
    profile_service: web::Data<ProfileService>,
    body: ValidatedJson<UpdateProfileModel>,
    req: HttpRequest,
) -> Result<success::Success<ProfileResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let profile = profile_service.update_profile(id, body.0).await?;
    Ok(success::Success::ok(Some(profile)).message("Profile updated successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_profile(
    profile_service: web::Data<ProfileService>,
    profile_id: web::Path<Uuid>,
) -> Result<success::Success<ProfileResponse>, error::Error> {
    let profile = profile_service.get_profile(profile_id.into_inner()).await?;
    Ok(success::Success::ok(Some(profile)).message("Profile retrieved successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}/posts")]
pub async fn get_profile_posts(
    post_service: web::Data<PostService>,
    profile_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PostResponse>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let posts = post_service.profile_posts(viewer_id, profile_id.into_inner()).await?;
    Ok(success::Success::ok(Some(posts)))
}

#[get("/{id:[0-9a-fA-F-]{36}}/photos")]
pub async fn get_profile_photos(
    post_service: web::Data<PostService>,
    profile_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<Vec<String>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let photos = post_service.profile_photos(viewer_id, profile_id.into_inner()).await?;
    Ok(success::Success::ok(Some(photos)))
}
