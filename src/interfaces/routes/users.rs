use actix_web::web;

use crate::{handlers::users, repositories::store::Store};

pub fn config_routes<S: Store>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(
                web::resource("")
                    .route(web::get().to(users::get_all_users::<S>))
                    .route(web::post().to(users::create_user::<S>))
            )
            .service(
                web::resource("/{user_id}")
                    .route(web::get().to(users::get_user::<S>))
                    .route(web::put().to(users::update_user::<S>))
                    .route(web::delete().to(users::delete_user::<S>))
            )
            .service(
                web::resource("/{user_id}/skills")
                    .route(web::post().to(users::add_skill_to_user::<S>))
            )
            .service(
                web::resource("/{user_id}/skills/{skill_name}")
                    .route(web::delete().to(users::remove_skill_from_user::<S>))
            )
    );
}
