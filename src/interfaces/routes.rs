use actix_web::web;

use crate::{constants::API_PREFIX, handlers::{home::home, system}, repositories::store::Store};

mod json_error;
mod skills;
mod users;

pub fn configure_routes<S: Store>(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.route("/health", web::get().to(system::health_check::<S>));

    cfg.service(
        web::scope(API_PREFIX)
            .configure(users::config_routes::<S>)
            .configure(skills::config_routes::<S>)
    );

    cfg.configure(json_error::config_routes);
}
