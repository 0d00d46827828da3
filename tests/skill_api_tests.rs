mod test_utils;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn create_skill_returns_201_then_200_for_same_name() {
    let app = TestApp::spawn().await;

    let first = app
        .post_json(
            "/api/skills",
            &json!({ "name": "Rust", "description": "Systems language", "difficulty": "advanced" }),
        )
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let created: Value = first.json().await.unwrap();
    assert_eq!(created["created"], true);
    assert_eq!(created["name"], "Rust");
    assert_eq!(created["difficulty"], "advanced");

    let second = app
        .post_json(
            "/api/skills",
            &json!({ "name": "Rust", "description": "Something else", "difficulty": "novice" }),
        )
        .await;
    assert_eq!(second.status(), StatusCode::OK);
    let existing: Value = second.json().await.unwrap();
    assert_eq!(existing["created"], false);
    assert_eq!(existing["id"], created["id"]);
    assert_eq!(existing["description"], "Systems language");
    assert_eq!(existing["difficulty"], "advanced");

    let skills: Vec<Value> = app.get("/api/skills").await.json().await.unwrap();
    assert_eq!(skills.len(), 1);
}

#[actix_rt::test]
async fn create_skill_rejects_blank_name_and_unknown_difficulty() {
    let app = TestApp::spawn().await;

    let blank = app.post_json("/api/skills", &json!({ "name": "  " })).await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let bad_level = app
        .post_json("/api/skills", &json!({ "name": "Go", "difficulty": "wizard" }))
        .await;
    assert_eq!(bad_level.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn list_skills_is_ordered_by_name() {
    let app = TestApp::spawn().await;
    app.create_skill(json!({ "name": "Rust" })).await;
    app.create_skill(json!({ "name": "Go" })).await;
    app.create_skill(json!({ "name": "Python" })).await;

    let skills: Vec<Value> = app.get("/api/skills").await.json().await.unwrap();

    let names: Vec<&str> = skills.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Go", "Python", "Rust"]);
}

#[actix_rt::test]
async fn get_skill_by_id_and_by_name() {
    let app = TestApp::spawn().await;
    let skill = app
        .create_skill(json!({ "name": "SQL", "category": "data" }))
        .await;
    let id = skill["id"].as_str().unwrap();

    let by_id = app.get(&format!("/api/skills/{}", id)).await;
    assert_eq!(by_id.status(), StatusCode::OK);
    let by_id: Value = by_id.json().await.unwrap();
    assert_eq!(by_id["name"], "SQL");
    assert_eq!(by_id["category"], "data");

    let by_name = app.get("/api/skills/name/SQL").await;
    assert_eq!(by_name.status(), StatusCode::OK);
    let by_name: Value = by_name.json().await.unwrap();
    assert_eq!(by_name["id"], skill["id"]);
}

#[actix_rt::test]
async fn unknown_skills_are_404() {
    let app = TestApp::spawn().await;

    let by_id = app.get(&format!("/api/skills/{}", Uuid::new_v4())).await;
    assert_eq!(by_id.status(), StatusCode::NOT_FOUND);

    let by_name = app.get("/api/skills/name/Fortran").await;
    assert_eq!(by_name.status(), StatusCode::NOT_FOUND);

    let bad_id = app.get("/api/skills/not-a-uuid").await;
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn update_skill_overwrites_fields_and_shows_on_users() {
    let app = TestApp::spawn().await;
    let user = app.create_user("Ada", "ada@example.com").await;
    let user_id = user["id"].as_str().unwrap();
    app.add_skill(user_id, "Js").await;

    let skill: Value = app.get("/api/skills/name/Js").await.json().await.unwrap();
    let skill_id = skill["id"].as_str().unwrap();

    let response = app
        .put_json(
            &format!("/api/skills/{}", skill_id),
            &json!({ "name": "JavaScript", "category": "web", "difficulty": "intermediate" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["id"], skill["id"]);
    assert_eq!(updated["name"], "JavaScript");
    assert_eq!(updated["difficulty"], "intermediate");

    let user: Value = app
        .get(&format!("/api/users/{}", user_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(skill_names(&user), vec!["JavaScript"]);
}

#[actix_rt::test]
async fn update_skill_to_taken_name_is_conflict() {
    let app = TestApp::spawn().await;
    app.create_skill(json!({ "name": "Go" })).await;
    let rust = app.create_skill(json!({ "name": "Rust" })).await;

    let response = app
        .put_json(
            &format!("/api/skills/{}", rust["id"].as_str().unwrap()),
            &json!({ "name": "Go" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn update_unknown_skill_is_404() {
    let app = TestApp::spawn().await;

    let response = app
        .put_json(&format!("/api/skills/{}", Uuid::new_v4()), &json!({ "name": "Go" }))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn deleting_a_skill_unlinks_it_from_users() {
    let app = TestApp::spawn().await;
    let user = app.create_user("Ada", "ada@example.com").await;
    let user_id = user["id"].as_str().unwrap();
    app.add_skill(user_id, "Go").await;
    app.add_skill(user_id, "Rust").await;

    let go: Value = app.get("/api/skills/name/Go").await.json().await.unwrap();
    let go_path = format!("/api/skills/{}", go["id"].as_str().unwrap());

    let response = app.delete(&go_path).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let user: Value = app
        .get(&format!("/api/users/{}", user_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(skill_names(&user), vec!["Rust"]);

    let again = app.delete(&go_path).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn delete_skill_by_name_tolerates_unknown_names() {
    let app = TestApp::spawn().await;
    app.create_skill(json!({ "name": "Perl" })).await;

    let response = app.delete("/api/skills/name/Perl").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let gone = app.get("/api/skills/name/Perl").await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let unknown = app.delete("/api/skills/name/Perl").await;
    assert_eq!(unknown.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn skill_created_through_a_user_can_be_shared() {
    let app = TestApp::spawn().await;
    let ada = app.create_user("Ada", "ada@example.com").await;
    let grace = app.create_user("Grace", "grace@example.com").await;

    app.add_skill(ada["id"].as_str().unwrap(), "Go").await;
    app.add_skill(grace["id"].as_str().unwrap(), "Go").await;

    let skills: Vec<Value> = app.get("/api/skills").await.json().await.unwrap();
    assert_eq!(skills.len(), 1);

    let users: Vec<Value> = app.get("/api/users").await.json().await.unwrap();
    assert_eq!(users.len(), 2);
    for user in &users {
        assert_eq!(skill_names(user), vec!["Go"]);
        assert_eq!(user["skills"][0]["id"], skills[0]["id"]);
    }
}
