use crate::modules::relationship::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/relationships")
            .service(tag_suggestions)
            .service(list_friends)
            .service(send_request)
            .service(cancel_request)
            .service(respond)
            .service(get_status)
            .service(unfriend),
    );
}
