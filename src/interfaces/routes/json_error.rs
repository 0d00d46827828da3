use actix_web::{error::{JsonPayloadError, PathError}, web};

use crate::errors::AppError;

/// Malformed bodies and paths answer 400 with the usual `{"error": ...}` shape
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        AppError::InvalidInput(format!("JSON payload error: {}", err)).into()
    }));

    cfg.app_data(web::PathConfig::default().error_handler(|err: PathError, _req| {
        AppError::InvalidInput(format!("Path error: {}", err)).into()
    }));
}
