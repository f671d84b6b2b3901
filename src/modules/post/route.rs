use crate::modules::post::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/posts")
            .service(get_feed)
            .service(create_post)
            .service(get_saved_posts)
            .service(get_moods)
            .service(get_post)
            .service(delete_post)
            .service(set_visibility)
            .service(get_comments)
            .service(add_comment)
            .service(get_likes)
            .service(toggle_like)
            .service(toggle_save),
    );
}
