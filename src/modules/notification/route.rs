use crate::modules::notification::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/notifications")
            .service(get_overview)
            .service(list_friend_requests)
            .service(list_tag_notifications)
            .service(mark_tag_read),
    );
}
