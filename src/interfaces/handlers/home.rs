use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Learning Path API is up and running!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "resources": ["/api/users", "/api/skills"],
        "health": "/health"
    }))
}
