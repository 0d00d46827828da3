use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{
    entities::{skill::{Skill, SkillCreated, SkillInsert}, user::{User, UserInsert}},
    errors::AppError,
    repositories::{
        skill::SkillRepository,
        store::{Store, Transaction},
        user::{UserRepository, UserSkillRow},
    },
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    skills: HashMap<Uuid, Skill>,
    /// (user_id, skill_id)
    links: BTreeSet<(Uuid, Uuid)>,
}

/// Process-local store. Transactions run one at a time: `begin` waits for
/// the state lock and the transaction keeps it until commit or drop. Writes
/// go to a private copy that `commit` installs and a drop throws away.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

pub struct MemoryTx {
    shared: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, AppError> {
        let shared = Arc::clone(&self.state).lock_owned().await;
        let working = MemoryState::clone(&shared);
        Ok(MemoryTx { shared, working })
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl Transaction for MemoryTx {
    async fn commit(self) -> Result<(), AppError> {
        let MemoryTx { mut shared, working } = self;
        *shared = working;
        Ok(())
    }
}

impl MemoryState {
    fn name_taken_by_other(&self, name: &str, id: &Uuid) -> bool {
        self.skills
            .values()
            .any(|s| s.name == name && &s.id != id)
    }

    fn skills_of(&self, user_id: &Uuid) -> Vec<Skill> {
        let mut skills: Vec<Skill> = self.links
            .range((*user_id, Uuid::nil())..=(*user_id, Uuid::from_u128(u128::MAX)))
            .filter_map(|(_, skill_id)| self.skills.get(skill_id).cloned())
            .collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        skills
    }
}

#[async_trait]
impl UserRepository for MemoryTx {
    async fn create_user(&mut self, user: &UserInsert) -> Result<User, AppError> {
        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: now,
            updated_at: now,
        };
        self.working.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_user_by_id(&mut self, id: &Uuid) -> Result<Option<User>, AppError> {
        Ok(self.working.users.get(id).cloned())
    }

    async fn list_users(&mut self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.working.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn update_user(&mut self, id: &Uuid, user: &UserInsert) -> Result<Option<User>, AppError> {
        Ok(self.working.users.get_mut(id).map(|existing| {
            existing.name = user.name.clone();
            existing.email = user.email.clone();
            existing.updated_at = Utc::now();
            existing.clone()
        }))
    }

    async fn delete_user(&mut self, id: &Uuid) -> Result<bool, AppError> {
        if self.working.users.remove(id).is_none() {
            return Ok(false);
        }
        self.working.links.retain(|(user_id, _)| user_id != id);
        Ok(true)
    }

    async fn get_user_skills(&mut self, user_id: &Uuid) -> Result<Vec<Skill>, AppError> {
        Ok(self.working.skills_of(user_id))
    }

    async fn list_user_skills(&mut self) -> Result<Vec<UserSkillRow>, AppError> {
        let mut rows: Vec<UserSkillRow> = self.working.links
            .iter()
            .filter_map(|(user_id, skill_id)| {
                self.working.skills.get(skill_id).map(|skill| UserSkillRow {
                    user_id: *user_id,
                    skill: skill.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| a.skill.name.cmp(&b.skill.name));
        Ok(rows)
    }

    async fn link_skill(&mut self, user_id: &Uuid, skill_id: &Uuid) -> Result<bool, AppError> {
        if !self.working.users.contains_key(user_id) || !self.working.skills.contains_key(skill_id) {
            return Err(AppError::Conflict("Referenced record does not exist".into()));
        }
        Ok(self.working.links.insert((*user_id, *skill_id)))
    }

    async fn unlink_skill(&mut self, user_id: &Uuid, skill_id: &Uuid) -> Result<bool, AppError> {
        Ok(self.working.links.remove(&(*user_id, *skill_id)))
    }

    async fn clear_user_skills(&mut self, user_id: &Uuid) -> Result<u64, AppError> {
        let before = self.working.links.len();
        self.working.links.retain(|(owner, _)| owner != user_id);
        Ok((before - self.working.links.len()) as u64)
    }
}

#[async_trait]
impl SkillRepository for MemoryTx {
    async fn get_or_create_skill(&mut self, skill: &SkillInsert) -> Result<SkillCreated, AppError> {
        if let Some(existing) = self.working.skills.values().find(|s| s.name == skill.name) {
            return Ok(SkillCreated { skill: existing.clone(), created: false });
        }

        let now = Utc::now();
        let created = Skill {
            id: Uuid::new_v4(),
            name: skill.name.clone(),
            description: skill.description.clone(),
            category: skill.category.clone(),
            difficulty: skill.difficulty,
            created_at: now,
            updated_at: now,
        };
        self.working.skills.insert(created.id, created.clone());
        Ok(SkillCreated { skill: created, created: true })
    }

    async fn get_skill_by_id(&mut self, id: &Uuid) -> Result<Option<Skill>, AppError> {
        Ok(self.working.skills.get(id).cloned())
    }

    async fn get_skill_by_name(&mut self, name: &str) -> Result<Option<Skill>, AppError> {
        Ok(self.working.skills.values().find(|s| s.name == name).cloned())
    }

    async fn list_skills(&mut self) -> Result<Vec<Skill>, AppError> {
        let mut skills: Vec<Skill> = self.working.skills.values().cloned().collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(skills)
    }

    async fn update_skill(&mut self, id: &Uuid, skill: &SkillInsert) -> Result<Option<Skill>, AppError> {
        if !self.working.skills.contains_key(id) {
            return Ok(None);
        }
        if self.working.name_taken_by_other(&skill.name, id) {
            return Err(AppError::Conflict("Skill with this name already exists".into()));
        }

        Ok(self.working.skills.get_mut(id).map(|existing| {
            existing.name = skill.name.clone();
            existing.description = skill.description.clone();
            existing.category = skill.category.clone();
            existing.difficulty = skill.difficulty;
            existing.updated_at = Utc::now();
            existing.clone()
        }))
    }

    async fn delete_skill(&mut self, id: &Uuid) -> Result<bool, AppError> {
        if self.working.skills.remove(id).is_none() {
            return Ok(false);
        }
        self.working.links.retain(|(_, skill_id)| skill_id != id);
        Ok(true)
    }
}
