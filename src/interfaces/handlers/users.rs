use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::user::{AddSkillRequest, NewUser, UpdateUser},
    errors::AppError,
    repositories::store::Store,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_all_users<S: Store>(
    state: web::Data<AppState<S>>,
) -> Result<impl Responder, AppError> {
    let users = state.user_handler.get_all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[instrument(skip(state, data))]
pub async fn create_user<S: Store>(
    state: web::Data<AppState<S>>,
    data: web::Json<NewUser>,
) -> Result<impl Responder, AppError> {
    let user = state.user_handler.create_user(data.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header(("Location", format!("/api/users/{}", user.id)))
        .json(user))
}

#[instrument(skip(state))]
pub async fn get_user<S: Store>(
    state: web::Data<AppState<S>>,
    user_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    match state.user_handler.get_user_by_id(&user_id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound("User not found".to_string())),
    }
}

#[instrument(skip(state, data))]
pub async fn update_user<S: Store>(
    state: web::Data<AppState<S>>,
    user_id: web::Path<String>,
    data: web::Json<UpdateUser>,
) -> Result<impl Responder, AppError> {
    let user = state.user_handler.update_user(&user_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[instrument(skip(state))]
pub async fn delete_user<S: Store>(
    state: web::Data<AppState<S>>,
    user_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.user_handler.delete_user(&user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state, data))]
pub async fn add_skill_to_user<S: Store>(
    state: web::Data<AppState<S>>,
    user_id: web::Path<String>,
    data: web::Json<AddSkillRequest>,
) -> Result<impl Responder, AppError> {
    let user = state.association_handler
        .add_skill_to_user(&user_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

#[instrument(skip(state))]
pub async fn remove_skill_from_user<S: Store>(
    state: web::Data<AppState<S>>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, AppError> {
    let (user_id, skill_name) = path.into_inner();

    let user = state.association_handler
        .remove_skill_from_user(&user_id, &skill_name)
        .await?;
    Ok(HttpResponse::Ok().json(user))
}
