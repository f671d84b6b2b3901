use actix_web::{delete, get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        profile::model::ProfileSummary,
        relationship::{
            model::{RelationshipView, RespondBody, SendRequestBody, SuggestionQuery},
            service::RelationshipService,
        },
    },
    utils::{ValidatedJson, ValidatedQuery},
};

#[get("/{subject_id:[0-9a-fA-F-]{36}}")]
pub async fn get_status(
    relationship_service: web::Data<RelationshipService>,
    subject_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<RelationshipView>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let view = relationship_service.status(viewer_id, subject_id.into_inner()).await?;
    Ok(success::Success::ok(Some(view)).message("Relationship retrieved successfully"))
}

#[post("")]
pub async fn send_request(
    relationship_service: web::Data<RelationshipService>,
    body: ValidatedJson<SendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<RelationshipView>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let view = relationship_service.send_request(viewer_id, body.0.addressee_id).await?;
    Ok(success::Success::created(Some(view)).message("Friend request sent successfully"))
}

#[delete("/{id:[0-9a-fA-F-]{36}}/request")]
pub async fn cancel_request(
    relationship_service: web::Data<RelationshipService>,
    relationship_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<RelationshipView>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let view = relationship_service.cancel_request(viewer_id, relationship_id.into_inner()).await?;
    Ok(success::Success::ok(Some(view)).message("Friend request cancelled"))
}

#[post("/{id:[0-9a-fA-F-]{36}}/respond")]
pub async fn respond(
    relationship_service: web::Data<RelationshipService>,
    relationship_id: web::Path<Uuid>,
    body: ValidatedJson<RespondBody>,
    req: HttpRequest,
) -> Result<success::Success<RelationshipView>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let accept = body.0.accept;
    let view =
        relationship_service.respond(viewer_id, relationship_id.into_inner(), accept).await?;
    let message = if accept { "Friend request accepted" } else { "Friend request rejected" };
    Ok(success::Success::ok(Some(view)).message(message))
}

#[delete("/{id:[0-9a-fA-F-]{36}}")]
pub async fn unfriend(
    relationship_service: web::Data<RelationshipService>,
    relationship_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<RelationshipView>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let view = relationship_service.unfriend(viewer_id, relationship_id.into_inner()).await?;
    Ok(success::Success::ok(Some(view)).message("Friend removed"))
}

#[get("/friends/{user_id:[0-9a-fA-F-]{36}}")]
pub async fn list_friends(
    relationship_service: web::Data<RelationshipService>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<Vec<ProfileSummary>>, error::Error> {
    let friends = relationship_service.friends_of(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}

#[get("/suggestions")]
pub async fn tag_suggestions(
    relationship_service: web::Data<RelationshipService>,
    query: ValidatedQuery<SuggestionQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ProfileSummary>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let suggestions = relationship_service.tag_suggestions(viewer_id, &query.0.q).await?;
    Ok(success::Success::ok(Some(suggestions)))
}
