use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::skill::{NewSkill, UpdateSkill},
    errors::AppError,
    repositories::store::Store,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_all_skills<S: Store>(
    state: web::Data<AppState<S>>,
) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.get_all_skills().await?;
    Ok(HttpResponse::Ok().json(skills))
}

/// 201 for a new skill, 200 when the name was already registered
#[instrument(skip(state, data))]
pub async fn create_skill<S: Store>(
    state: web::Data<AppState<S>>,
    data: web::Json<NewSkill>,
) -> Result<impl Responder, AppError> {
    let outcome = state.skill_handler.create_skill(data.into_inner()).await?;

    let mut response = if outcome.created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };

    Ok(response
        .insert_header(("Location", format!("/api/skills/{}", outcome.skill.id)))
        .json(outcome))
}

#[instrument(skip(state))]
pub async fn get_skill<S: Store>(
    state: web::Data<AppState<S>>,
    skill_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.skill_handler
        .get_skill_by_id(&skill_id)
        .await?
        .map(|skill| HttpResponse::Ok().json(skill))
        .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))
}

#[instrument(skip(state))]
pub async fn get_skill_by_name<S: Store>(
    state: web::Data<AppState<S>>,
    name: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.skill_handler
        .get_skill_by_name(&name)
        .await?
        .map(|skill| HttpResponse::Ok().json(skill))
        .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))
}

#[instrument(skip(state, data))]
pub async fn update_skill<S: Store>(
    state: web::Data<AppState<S>>,
    skill_id: web::Path<String>,
    data: web::Json<UpdateSkill>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.update_skill(&skill_id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(state))]
pub async fn delete_skill<S: Store>(
    state: web::Data<AppState<S>>,
    skill_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.skill_handler.delete_skill_by_id(&skill_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Always 204; an unknown name is not an error
#[instrument(skip(state))]
pub async fn delete_skill_by_name<S: Store>(
    state: web::Data<AppState<S>>,
    name: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.skill_handler.delete_skill_by_name(&name).await?;
    Ok(HttpResponse::NoContent().finish())
}
