use actix_web::{get, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::notification::{
        model::{FriendRequestNotice, NotificationsOverview, TagNotificationResponse},
        service::NotificationService,
    },
};

#[get("")]
pub async fn get_overview(
    notification_service: web::Data<NotificationService>,
    req: HttpRequest,
) -> Result<success::Success<NotificationsOverview>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let overview = notification_service.overview(viewer_id).await?;
    Ok(success::Success::ok(Some(overview)))
}

#[get("/friend-requests")]
pub async fn list_friend_requests(
    notification_service: web::Data<NotificationService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestNotice>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let requests = notification_service.friend_requests(viewer_id).await?;
    Ok(success::Success::ok(Some(requests)).message("Friend requests retrieved successfully"))
}

#[get("/tags")]
pub async fn list_tag_notifications(
    notification_service: web::Data<NotificationService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<TagNotificationResponse>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let tags = notification_service.tag_notifications(viewer_id).await?;
    Ok(success::Success::ok(Some(tags)).message("Tag notifications retrieved successfully"))
}

#[post("/{id:[0-9a-fA-F-]{36}}/read")]
pub async fn mark_tag_read(
    notification_service: web::Data<NotificationService>,
    notification_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<Vec<TagNotificationResponse>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let unread = notification_service.mark_tag_read(viewer_id, notification_id.into_inner()).await?;
    Ok(success::Success::ok(Some(unread)).message("Notification marked as read"))
}
