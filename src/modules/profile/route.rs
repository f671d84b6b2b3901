use crate::modules::profile::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/profiles")
            .service(get_own_profile)
            .service(update_own_profile)
            .service(get_profile_posts)
            .service(get_profile_photos)
            .service(get_profile),
    );
}
