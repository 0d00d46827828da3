//! Runs against a real database only when `APP_TEST_DATABASE_URL` is set.

mod test_utils;

use learning_path_api::{
    db::postgres::create_pool,
    entities::{
        skill::{NewSkill, SkillInsert},
        user::{AddSkillRequest, NewUser, UpdateUser},
    },
    errors::AppError,
    repositories::{
        skill::SkillRepository,
        sqlx_repo::SqlxStore,
        store::{Store, Transaction},
    },
    AppState,
};
use test_utils::has_skill;
use uuid::Uuid;

async fn store() -> Option<SqlxStore> {
    let url = std::env::var("APP_TEST_DATABASE_URL").ok()?;
    let pool = create_pool(&url, 8).await.expect("Failed to connect to test database");
    let store = SqlxStore::new(pool);
    store.run_migrations().await.expect("Failed to run migrations");
    Some(store)
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

#[tokio::test]
async fn get_or_create_keeps_one_row_per_name() {
    let Some(store) = store().await else { return };
    let name = unique("skill");

    let mut tx = store.begin().await.unwrap();
    let first = tx.get_or_create_skill(&SkillInsert::named(name.as_str())).await.unwrap();
    let second = tx.get_or_create_skill(&SkillInsert::named(name.as_str())).await.unwrap();
    tx.commit().await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.skill, second.skill);
}

#[tokio::test]
async fn renaming_onto_a_taken_name_is_a_conflict() {
    let Some(store) = store().await else { return };
    let taken = unique("taken");

    let mut tx = store.begin().await.unwrap();
    tx.get_or_create_skill(&SkillInsert::named(taken.as_str())).await.unwrap();
    let other = tx.get_or_create_skill(&SkillInsert::named(unique("other"))).await.unwrap();

    let err = tx.update_skill(&other.skill.id, &SkillInsert::named(taken.as_str())).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_creates_of_one_name_all_succeed() {
    let Some(store) = store().await else { return };
    let state = std::sync::Arc::new(AppState::new(store));
    let name = unique("race");

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let state = std::sync::Arc::clone(&state);
            let name = name.clone();
            tokio::spawn(async move {
                state.skill_handler
                    .create_skill(NewSkill { name, description: None, category: None, difficulty: None })
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    let mut created = 0;
    for task in tasks {
        let outcome = task.await.unwrap().unwrap();
        created += outcome.created as usize;
        ids.push(outcome.skill.id);
    }

    assert_eq!(created, 1);
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert!(state.skill_handler.delete_skill_by_name(&name).await.unwrap());
}

#[tokio::test]
async fn uncommitted_transaction_rolls_back() {
    let Some(store) = store().await else { return };
    let name = unique("rollback");

    {
        let mut tx = store.begin().await.unwrap();
        tx.get_or_create_skill(&SkillInsert::named(name.as_str())).await.unwrap();
    }

    let mut tx = store.begin().await.unwrap();
    assert!(tx.get_skill_by_name(&name).await.unwrap().is_none());
    tx.commit().await.unwrap();
}

#[tokio::test]
async fn user_skill_lifecycle_in_postgres() {
    let Some(store) = store().await else { return };
    let state = AppState::new(store);
    let skill = unique("go");
    let other = unique("rust");

    let user = state.user_handler
        .create_user(NewUser { name: "Ada".into(), email: "ada@example.com".into() })
        .await
        .unwrap();
    let id = user.id.to_string();

    let user = state.association_handler
        .add_skill_to_user(&id, AddSkillRequest { skill_name: skill.clone() })
        .await
        .unwrap();
    assert!(has_skill(&user, &skill));

    let user = state.user_handler
        .update_user(
            &id,
            UpdateUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                skills: Some(vec![other.clone()]),
            },
        )
        .await
        .unwrap();
    assert!(has_skill(&user, &other));
    assert!(!has_skill(&user, &skill));

    state.user_handler.delete_user(&id).await.unwrap();
    assert!(state.skill_handler.get_skill_by_name(&other).await.unwrap().is_some());

    assert!(state.skill_handler.delete_skill_by_name(&skill).await.unwrap());
    assert!(state.skill_handler.delete_skill_by_name(&other).await.unwrap());
}
