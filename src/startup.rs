use std::net::TcpListener;

use actix_web::{dev::Server, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{repositories::store::Store, routes::configure_routes, settings::AppConfig, AppState};

/// Builds the HTTP server on an already-bound listener. The returned future
/// must be awaited or spawned to start serving.
pub fn build_server<S: Store>(
    config: &AppConfig,
    store: S,
    listener: TcpListener,
) -> std::io::Result<Server> {
    let app_state = web::Data::new(AppState::new(store));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes::<S>)
    })
    .listen(listener)?
    .workers(config.worker_count)
    .run();

    Ok(server)
}
