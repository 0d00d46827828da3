use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{skill::Skill, user::{User, UserInsert}},
    errors::AppError,
    repositories::sqlx_repo::SqlxTx,
};

/// A skill row tagged with the user it is linked to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserSkillRow {
    pub user_id: Uuid,
    #[sqlx(flatten)]
    pub skill: Skill,
}

#[async_trait]
pub trait UserRepository: Send {
    async fn create_user(&mut self, user: &UserInsert) -> Result<User, AppError>;
    async fn get_user_by_id(&mut self, id: &Uuid) -> Result<Option<User>, AppError>;
    async fn list_users(&mut self) -> Result<Vec<User>, AppError>;
    /// Overwrites name and email. `None` when no such user exists.
    async fn update_user(&mut self, id: &Uuid, user: &UserInsert) -> Result<Option<User>, AppError>;
    /// Removes the user and its skill links. `false` when no such user exists.
    async fn delete_user(&mut self, id: &Uuid) -> Result<bool, AppError>;

    async fn get_user_skills(&mut self, user_id: &Uuid) -> Result<Vec<Skill>, AppError>;
    async fn list_user_skills(&mut self) -> Result<Vec<UserSkillRow>, AppError>;
    /// Links a skill to a user. `false` when the link already existed.
    async fn link_skill(&mut self, user_id: &Uuid, skill_id: &Uuid) -> Result<bool, AppError>;
    /// Unlinks a skill from a user. `false` when there was no link.
    async fn unlink_skill(&mut self, user_id: &Uuid, skill_id: &Uuid) -> Result<bool, AppError>;
    async fn clear_user_skills(&mut self, user_id: &Uuid) -> Result<u64, AppError>;
}

#[async_trait]
impl UserRepository for SqlxTx {
    async fn create_user(&mut self, user: &UserInsert) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(user)
    }

    async fn get_user_by_id(&mut self, id: &Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(AppError::from)
    }

    async fn list_users(&mut self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at, updated_at FROM users ORDER BY created_at, id",
        )
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(users)
    }

    async fn update_user(&mut self, id: &Uuid, user: &UserInsert) -> Result<Option<User>, AppError> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = $1,
                email = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(updated)
    }

    async fn delete_user(&mut self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_user_skills(&mut self, user_id: &Uuid) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>(
            r#"
            SELECT s.id, s.name, s.description, s.category, s.difficulty, s.created_at, s.updated_at
            FROM skills s
            JOIN user_skills us ON us.skill_id = s.id
            WHERE us.user_id = $1
            ORDER BY s.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(skills)
    }

    async fn list_user_skills(&mut self) -> Result<Vec<UserSkillRow>, AppError> {
        let rows = sqlx::query_as::<_, UserSkillRow>(
            r#"
            SELECT us.user_id, s.id, s.name, s.description, s.category, s.difficulty, s.created_at, s.updated_at
            FROM user_skills us
            JOIN skills s ON s.id = us.skill_id
            ORDER BY s.name
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(rows)
    }

    async fn link_skill(&mut self, user_id: &Uuid, skill_id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_skills (user_id, skill_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, skill_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(skill_id)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn unlink_skill(&mut self, user_id: &Uuid, skill_id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_skills WHERE user_id = $1 AND skill_id = $2")
            .bind(user_id)
            .bind(skill_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_user_skills(&mut self, user_id: &Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM user_skills WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }
}
