use std::collections::BTreeSet;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::{skill::{Skill, SkillInsert}, user::{AddSkillRequest, UserResponse}},
    errors::AppError,
    repositories::{
        skill::SkillRepository,
        store::{Store, Transaction},
        user::UserRepository,
    },
    utils::valid_uuid::valid_uuid,
};

/// Maintains the user ↔ skill edge set. Skills are addressed by name and
/// created on first use.
#[derive(Clone)]
pub struct SkillAssociationHandler<S>
where
    S: Store,
{
    pub store: S,
}

impl<S> SkillAssociationHandler<S>
where
    S: Store,
{
    pub fn new(store: S) -> Self {
        SkillAssociationHandler { store }
    }

    /// Links the named skill to the user, creating the skill if nobody has
    /// registered it yet. Linking an already-held skill changes nothing.
    pub async fn add_skill_to_user(
        &self,
        user_id: &str,
        request: AddSkillRequest,
    ) -> Result<UserResponse, AppError> {
        request.validate()?;
        let valid_id = valid_uuid(user_id)?;
        let skill_name = request.skill_name.trim();

        let mut tx = self.store.begin().await?;

        let user = tx.get_user_by_id(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let skill = Self::get_or_create_skill(&mut tx, skill_name).await?;

        if tx.link_skill(&user.id, &skill.id).await? {
            tracing::info!(user_id = %user.id, skill = %skill.name, "Skill added to user");
        } else {
            tracing::debug!(user_id = %user.id, skill = %skill.name, "User already has skill");
        }

        let skills = tx.get_user_skills(&user.id).await?;
        tx.commit().await?;

        Ok(UserResponse::new(user, skills))
    }

    /// Unlinks the named skill from the user. An unknown skill name or a
    /// skill the user does not hold leaves everything untouched.
    pub async fn remove_skill_from_user(
        &self,
        user_id: &str,
        skill_name: &str,
    ) -> Result<UserResponse, AppError> {
        let valid_id = valid_uuid(user_id)?;

        let mut tx = self.store.begin().await?;

        let user = tx.get_user_by_id(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        match tx.get_skill_by_name(skill_name.trim()).await? {
            Some(skill) => {
                if tx.unlink_skill(&user.id, &skill.id).await? {
                    tracing::info!(user_id = %user.id, skill = %skill.name, "Skill removed from user");
                } else {
                    tracing::debug!(user_id = %user.id, skill = %skill.name, "User does not have skill");
                }
            }
            None => {
                tracing::debug!(user_id = %user.id, skill = skill_name, "No such skill, nothing to remove");
            }
        }

        let skills = tx.get_user_skills(&user.id).await?;
        tx.commit().await?;

        Ok(UserResponse::new(user, skills))
    }

    /// Replaces the user's whole skill set with the named skills inside the
    /// caller's transaction. Blank and repeated names are ignored.
    pub async fn replace_user_skills(
        tx: &mut S::Tx,
        user_id: &Uuid,
        skill_names: &[String],
    ) -> Result<Vec<Skill>, AppError> {
        let wanted: BTreeSet<&str> = skill_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect();

        let removed = tx.clear_user_skills(user_id).await?;

        for name in &wanted {
            let skill = Self::get_or_create_skill(tx, name).await?;
            tx.link_skill(user_id, &skill.id).await?;
        }

        tracing::info!(%user_id, removed, linked = wanted.len(), "User skill set replaced");

        tx.get_user_skills(user_id).await
    }

    async fn get_or_create_skill(tx: &mut S::Tx, name: &str) -> Result<Skill, AppError> {
        let outcome = tx.get_or_create_skill(&SkillInsert::named(name)).await?;
        if outcome.created {
            tracing::info!(skill_id = %outcome.skill.id, skill = %outcome.skill.name, "Skill created on first use");
        }
        Ok(outcome.skill)
    }
}
