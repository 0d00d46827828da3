use actix_web::{web, HttpResponse, Responder};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{constants::START_TIME, repositories::store::Store, AppState};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    uptime: String,
    timestamp: String,
    start_at: String,
    storage: &'static str,
    version: &'static str,
}

/// 200 when storage answers, 503 otherwise
pub async fn health_check<S: Store>(state: web::Data<AppState<S>>) -> impl Responder {
    let now_utc = chrono::Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let storage_ok = match state.store.check_connection().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check: storage unavailable: {}", e);
            false
        }
    };

    let response = HealthCheckResponse {
        status: if storage_ok { "healthy" } else { "degraded" },
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        storage: if storage_ok { "OK" } else { "Unavailable" },
        version: env!("CARGO_PKG_VERSION"),
    };

    if storage_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
