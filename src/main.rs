use actix_cors::Cors;
use actix_web::{
    self,
    middleware::{from_fn, Logger},
    web, App, HttpServer,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::connect_database,
    middlewares::{authentication, authorization},
    modules::{
        notification::{repository_pg::NotificationRepositoryPg, service::NotificationService},
        post::{
            repository_pg::{LikeRepositoryPg, PostRepositoryPg, SavedPostRepositoryPg},
            service::PostService,
        },
        profile::{repository_pg::ProfileRepositoryPg, service::ProfileService},
        relationship::{repository_pg::RelationshipRepositoryPg, service::RelationshipService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check(db_pool: web::Data<sqlx::PgPool>) -> Result<&'static str, api::error::Error> {
    sqlx::query("SELECT 1").execute(db_pool.get_ref()).await.map_err(api::error::SystemError::from)?;
    Ok("Server is running")
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    let profile_repo = Arc::new(ProfileRepositoryPg::new(db_pool.clone()));
    let relationship_repo = Arc::new(RelationshipRepositoryPg::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepositoryPg::new(db_pool.clone()));

    let profile_service = ProfileService::with_dependencies(profile_repo.clone());
    let relationship_service =
        RelationshipService::with_dependencies(relationship_repo.clone(), profile_repo.clone());
    let notification_service = NotificationService::with_dependencies(
        notification_repo,
        relationship_repo,
        profile_repo.clone(),
    );
    let post_service = PostService::with_dependencies(
        Arc::new(PostRepositoryPg::new(db_pool.clone())),
        Arc::new(LikeRepositoryPg::new(db_pool.clone())),
        Arc::new(SavedPostRepositoryPg::new(db_pool.clone())),
        profile_repo,
        notification_service.clone(),
        ENV.feed_limit,
    );

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&ENV.frontend_url)
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(profile_service.clone()))
            .app_data(web::Data::new(relationship_service.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .service(health_check)
            .service(
                web::scope("/api")
                    .wrap(from_fn(authorization(vec!["authenticated"])))
                    .wrap(from_fn(authentication))
                    .configure(modules::profile::route::configure)
                    .configure(modules::relationship::route::configure)
                    .configure(modules::notification::route::configure)
                    .configure(modules::post::route::configure),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
