use actix_web::{delete, get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::post::{
        model::{
            CommentModel, CreatePostModel, FeedQuery, LikeSummary, MoodQuery, PostResponse,
            SaveState, VisibilityBody,
        },
        service::PostService,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

#[get("")]
pub async fn get_feed(
    post_service: web::Data<PostService>,
    query: ValidatedQuery<FeedQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PostResponse>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let posts = post_service.feed(viewer_id, query.0.mood).await?;
    Ok(success::Success::ok(Some(posts)))
}

#[post("")]
pub async fn create_post(
    post_service: web::Data<PostService>,
    body: ValidatedJson<CreatePostModel>,
    req: HttpRequest,
) -> Result<success::Success<PostResponse>, error::Error> {
    let author_id = get_claims(&req)?.sub;
    // the tag dispatch keeps running after the response is sent
    let created = post_service.create_post(author_id, body.0).await?;
    Ok(success::Success::created(Some(created.post)).message("Post created successfully"))
}

#[get("/saved")]
pub async fn get_saved_posts(
    post_service: web::Data<PostService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PostResponse>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let posts = post_service.saved_posts(viewer_id).await?;
    Ok(success::Success::ok(Some(posts)))
}

#[get("/moods")]
pub async fn get_moods(
    post_service: web::Data<PostService>,
    query: ValidatedQuery<MoodQuery>,
) -> Result<success::Success<Vec<&'static str>>, error::Error> {
    let moods = post_service.moods(query.0.q.as_deref());
    Ok(success::Success::ok(Some(moods)))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_post(
    post_service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<PostResponse>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let post = post_service.get_post(viewer_id, post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(post)))
}

#[delete("/{id:[0-9a-fA-F-]{36}}")]
pub async fn delete_post(
    post_service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    post_service.delete_post(viewer_id, post_id.into_inner()).await?;
    Ok(success::Success::ok(None).message("Post deleted successfully"))
}

#[patch("/{id:[0-9a-fA-F-]{36}}/visibility")]
pub async fn set_visibility(
    post_service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
    body: ValidatedJson<VisibilityBody>,
    req: HttpRequest,
) -> Result<success::Success<PostResponse>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let post = post_service.set_hidden(viewer_id, post_id.into_inner(), body.0.hidden).await?;
    Ok(success::Success::ok(Some(post)).message("Post visibility updated"))
}

#[get("/{id:[0-9a-fA-F-]{36}}/comments")]
pub async fn get_comments(
    post_service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PostResponse>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let comments = post_service.comments(viewer_id, post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(comments)))
}

#[post("/{id:[0-9a-fA-F-]{36}}/comments")]
pub async fn add_comment(
    post_service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
    body: ValidatedJson<CommentModel>,
    req: HttpRequest,
) -> Result<success::Success<PostResponse>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let comment = post_service.add_comment(viewer_id, post_id.into_inner(), body.0.content).await?;
    Ok(success::Success::created(Some(comment)).message("Comment added successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}/like")]
pub async fn get_likes(
    post_service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<LikeSummary>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let summary = post_service.like_summary(viewer_id, post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(summary)))
}

#[post("/{id:[0-9a-fA-F-]{36}}/like")]
pub async fn toggle_like(
    post_service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<LikeSummary>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let summary = post_service.toggle_like(viewer_id, post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(summary)))
}

#[post("/{id:[0-9a-fA-F-]{36}}/save")]
pub async fn toggle_save(
    post_service: web::Data<PostService>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<SaveState>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let state = post_service.toggle_save(viewer_id, post_id.into_inner()).await?;
    Ok(success::Success::ok(Some(state)))
}
