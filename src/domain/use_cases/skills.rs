use validator::Validate;

use crate::{
    entities::skill::{NewSkill, Skill, SkillCreated, UpdateSkill},
    errors::AppError,
    repositories::{
        skill::SkillRepository,
        store::{Store, Transaction},
    },
    utils::valid_uuid::valid_uuid,
};


pub struct SkillHandler<S>
where
    S: Store,
{
    pub store: S,
}

impl<S> SkillHandler<S>
where
    S: Store,
{
    pub fn new(store: S) -> Self {
        SkillHandler { store }
    }

    /// Registers a skill, or returns the existing one of the same name
    /// untouched. The attributes of a duplicate request are discarded.
    pub async fn create_skill(&self, request: NewSkill) -> Result<SkillCreated, AppError> {
        request.validate()?;

        let new_skill = request.prepare_for_insert();

        let mut tx = self.store.begin().await?;
        let outcome = tx.get_or_create_skill(&new_skill).await?;
        tx.commit().await?;

        if outcome.created {
            tracing::info!(skill_id = %outcome.skill.id, skill = %outcome.skill.name, "Skill created");
        } else {
            tracing::debug!(skill_id = %outcome.skill.id, skill = %outcome.skill.name, "Skill already exists");
        }
        Ok(outcome)
    }

    /// Lists every skill ordered by name
    pub async fn get_all_skills(&self) -> Result<Vec<Skill>, AppError> {
        let mut tx = self.store.begin().await?;
        tx.list_skills().await
    }

    /// Retrieves a skill by its ID. Absence is `Ok(None)`.
    pub async fn get_skill_by_id(&self, id: &str) -> Result<Option<Skill>, AppError> {
        let valid_id = valid_uuid(id)?;

        let mut tx = self.store.begin().await?;
        tx.get_skill_by_id(&valid_id).await
    }

    /// Retrieves a skill by its unique name. Absence is `Ok(None)`.
    pub async fn get_skill_by_name(&self, name: &str) -> Result<Option<Skill>, AppError> {
        let mut tx = self.store.begin().await?;
        tx.get_skill_by_name(name.trim()).await
    }

    /// Overwrites name, description, category and difficulty
    pub async fn update_skill(&self, id: &str, request: UpdateSkill) -> Result<Skill, AppError> {
        request.validate()?;

        let valid_id = valid_uuid(id)?;
        let changes = request.prepare_for_update();

        let mut tx = self.store.begin().await?;

        let skill = tx.update_skill(&valid_id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))?;

        tx.commit().await?;

        tracing::info!(skill_id = %skill.id, skill = %skill.name, "Skill updated");
        Ok(skill)
    }

    /// Deletes a skill by its ID, unlinking it from every user
    pub async fn delete_skill_by_id(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;

        let mut tx = self.store.begin().await?;

        if !tx.delete_skill(&valid_id).await? {
            return Err(AppError::NotFound("Skill not found".to_string()));
        }

        tx.commit().await?;

        tracing::info!(skill_id = %valid_id, "Skill deleted");
        Ok(())
    }

    /// Deletes a skill by name. Returns `false` without failing when no
    /// skill has that name.
    pub async fn delete_skill_by_name(&self, name: &str) -> Result<bool, AppError> {
        let mut tx = self.store.begin().await?;

        let Some(skill) = tx.get_skill_by_name(name.trim()).await? else {
            tracing::debug!(skill = name, "No such skill, nothing to delete");
            return Ok(false);
        };

        let deleted = tx.delete_skill(&skill.id).await?;
        tx.commit().await?;

        tracing::info!(skill_id = %skill.id, skill = %skill.name, "Skill deleted");
        Ok(deleted)
    }
}
