use std::collections::HashMap;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{skill::Skill, user::{NewUser, UpdateUser, UserResponse}},
    errors::AppError,
    repositories::{
        store::{Store, Transaction},
        user::UserRepository,
    },
    use_cases::associations::SkillAssociationHandler,
    utils::valid_uuid::valid_uuid,
};


pub struct UserHandler<S>
where
    S: Store,
{
    pub store: S,
}

impl<S> UserHandler<S>
where
    S: Store,
{
    pub fn new(store: S) -> Self {
        UserHandler { store }
    }

    /// Creates a user with an empty skill set
    pub async fn create_user(&self, request: NewUser) -> Result<UserResponse, AppError> {
        request.validate()?;

        let new_user = request.prepare_for_insert();

        let mut tx = self.store.begin().await?;
        let user = tx.create_user(&new_user).await?;
        tx.commit().await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(UserResponse::new(user, Vec::new()))
    }

    /// Retrieves a user and its skills. Absence is `Ok(None)`.
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<UserResponse>, AppError> {
        let valid_id = valid_uuid(id)?;

        let mut tx = self.store.begin().await?;
        let Some(user) = tx.get_user_by_id(&valid_id).await? else {
            return Ok(None);
        };
        let skills = tx.get_user_skills(&user.id).await?;

        Ok(Some(UserResponse::new(user, skills)))
    }

    /// Lists every user with its skills
    pub async fn get_all_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let mut tx = self.store.begin().await?;
        let users = tx.list_users().await?;

        let mut skills_by_user: HashMap<Uuid, Vec<Skill>> = HashMap::new();
        for row in tx.list_user_skills().await? {
            skills_by_user.entry(row.user_id).or_default().push(row.skill);
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let skills = skills_by_user.remove(&user.id).unwrap_or_default();
                UserResponse::new(user, skills)
            })
            .collect())
    }

    /// Overwrites name and email, and the whole skill set when one is supplied
    pub async fn update_user(&self, id: &str, request: UpdateUser) -> Result<UserResponse, AppError> {
        request.validate()?;

        let valid_id = valid_uuid(id)?;
        let changes = request.prepare_for_update();

        let mut tx = self.store.begin().await?;

        let user = tx.update_user(&valid_id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let skills = match &request.skills {
            Some(names) => SkillAssociationHandler::<S>::replace_user_skills(&mut tx, &user.id, names).await?,
            None => tx.get_user_skills(&user.id).await?,
        };

        tx.commit().await?;

        tracing::info!(user_id = %user.id, "User updated");
        Ok(UserResponse::new(user, skills))
    }

    /// Deletes a user. Its skills stay registered for everybody else.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;

        let mut tx = self.store.begin().await?;

        if !tx.delete_user(&valid_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tx.commit().await?;

        tracing::info!(user_id = %valid_id, "User deleted");
        Ok(())
    }
}
