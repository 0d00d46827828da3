use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::skill::{Skill, SkillCreated, SkillInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxTx,
};

const SKILL_NAME_CONSTRAINT: &str = "skills_name_key";

#[async_trait]
pub trait SkillRepository: Send {
    /// Inserts the skill unless one with the same name exists, in which case
    /// the stored skill is returned untouched with `created: false`.
    async fn get_or_create_skill(&mut self, skill: &SkillInsert) -> Result<SkillCreated, AppError>;
    async fn get_skill_by_id(&mut self, id: &Uuid) -> Result<Option<Skill>, AppError>;
    async fn get_skill_by_name(&mut self, name: &str) -> Result<Option<Skill>, AppError>;
    async fn list_skills(&mut self) -> Result<Vec<Skill>, AppError>;
    /// Overwrites every mutable column. `None` when no such skill exists.
    async fn update_skill(&mut self, id: &Uuid, skill: &SkillInsert) -> Result<Option<Skill>, AppError>;
    /// Removes the skill and every user link to it. `false` when no such skill exists.
    async fn delete_skill(&mut self, id: &Uuid) -> Result<bool, AppError>;
}

fn map_name_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(SKILL_NAME_CONSTRAINT) {
            return AppError::Conflict("Skill with this name already exists".into());
        }
    }
    AppError::from(e)
}

#[async_trait]
impl SkillRepository for SqlxTx {
    async fn get_or_create_skill(&mut self, skill: &SkillInsert) -> Result<SkillCreated, AppError> {
        // A concurrent insert of the same name makes this wait for that
        // transaction, then yield no row instead of a unique violation.
        let inserted = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (name, description, category, difficulty)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name, description, category, difficulty, created_at, updated_at
            "#,
        )
        .bind(&skill.name)
        .bind(&skill.description)
        .bind(&skill.category)
        .bind(skill.difficulty)
        .fetch_optional(&mut *self.tx)
        .await?;

        if let Some(skill) = inserted {
            return Ok(SkillCreated { skill, created: true });
        }

        self.get_skill_by_name(&skill.name)
            .await?
            .map(|existing| SkillCreated { skill: existing, created: false })
            .ok_or_else(|| AppError::Conflict("Skill was removed while being created".into()))
    }

    async fn get_skill_by_id(&mut self, id: &Uuid) -> Result<Option<Skill>, AppError> {
        sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, description, category, difficulty, created_at, updated_at
            FROM skills WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(AppError::from)
    }

    async fn get_skill_by_name(&mut self, name: &str) -> Result<Option<Skill>, AppError> {
        sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, description, category, difficulty, created_at, updated_at
            FROM skills WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(AppError::from)
    }

    async fn list_skills(&mut self) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>(
            r#"
            SELECT id, name, description, category, difficulty, created_at, updated_at
            FROM skills ORDER BY name
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(skills)
    }

    async fn update_skill(&mut self, id: &Uuid, skill: &SkillInsert) -> Result<Option<Skill>, AppError> {
        let updated = sqlx::query_as::<_, Skill>(
            r#"
            UPDATE skills SET
                name = $1,
                description = $2,
                category = $3,
                difficulty = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING id, name, description, category, difficulty, created_at, updated_at
            "#,
        )
        .bind(&skill.name)
        .bind(&skill.description)
        .bind(&skill.category)
        .bind(skill.difficulty)
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_name_conflict)?;

        Ok(updated)
    }

    async fn delete_skill(&mut self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
