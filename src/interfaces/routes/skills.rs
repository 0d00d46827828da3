use actix_web::web;

use crate::{handlers::skills, repositories::store::Store};

pub fn config_routes<S: Store>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/skills")
            .service(
                web::resource("")
                    .route(web::get().to(skills::get_all_skills::<S>))
                    .route(web::post().to(skills::create_skill::<S>))
            )
            .service(
                web::resource("/name/{name}")
                    .route(web::get().to(skills::get_skill_by_name::<S>))
                    .route(web::delete().to(skills::delete_skill_by_name::<S>))
            )
            .service(
                web::resource("/{skill_id}")
                    .route(web::get().to(skills::get_skill::<S>))
                    .route(web::put().to(skills::update_skill::<S>))
                    .route(web::delete().to(skills::delete_skill::<S>))
            )
    );
}
