use crate::common::{self, TestStateBuilder, jwt::create_test_token, test_data};
use axum::http::StatusCode;
use mtr_domain::Role;
use serde_json::{Value, json};
use uuid::Uuid;

fn curriculum_payload(module_ids: [Uuid; 2]) -> Value {
    json!({
        "modules": [
            {
                "id": module_ids[1],
                "title": "Ownership",
                "order": 2,
                "topics": [
                    { "id": Uuid::new_v4(), "title": "Borrowing", "type": "video", "duration_minutes": 40 },
                    { "id": Uuid::new_v4(), "title": "Lifetimes quiz", "type": "quiz", "duration_minutes": 20 }
                ]
            },
            {
                "id": module_ids[0],
                "title": "Getting started",
                "order": 1,
                "learning_objectives": ["Install the toolchain"],
                "topics": [
                    { "id": Uuid::new_v4(), "title": "Hello world", "type": "live_session", "duration_minutes": 30, "is_published": true }
                ]
            }
        ]
    })
}

#[tokio::test]
async fn test_list_programs_only_published_and_filtered() {
    let Some(state) = common::try_build().await else {
        return;
    };
    let client = common::app(state.clone());
    let email = test_data::unique_email("catalog");
    let mentor_id = common::db::create_mentor(&state.pool, &email, 0, 0.0)
        .await
        .expect("Failed to create mentor");
    let marker = Uuid::new_v4().simple().to_string();
    let published = common::db::create_program(
        &state.pool,
        mentor_id,
        &format!("Web Apps {marker}"),
        "programming",
        "published",
    )
    .await
    .expect("Failed to create program");
    common::db::create_program(
        &state.pool,
        mentor_id,
        &format!("Web Drafts {marker}"),
        "programming",
        "draft",
    )
    .await
    .expect("Failed to create program");

    let response = client.get(&format!("/v1/programs?search={marker}")).await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let programs = body["programs"].as_array().expect("programs array");
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0]["id"], published.to_string());

    let response = client
        .get(&format!("/v1/programs?search={marker}&category=no-such-category"))
        .await;
    let body: Value = response.json();
    assert!(body["programs"].as_array().expect("programs array").is_empty());

    common::db::delete_user_by_email(&state.pool, &email)
        .await
        .expect("cleanup");
}

#[tokio::test]
async fn test_list_programs_rejects_bad_sort() {
    let client = common::app(TestStateBuilder::new().build_lazy());

    let response = client.get("/v1/programs?sort=sideways").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.error_message().starts_with("Invalid query string"));
}

#[tokio::test]
async fn test_program_details_requires_auth() {
    let client = common::app(TestStateBuilder::new().build_lazy());

    let response = client
        .get(&format!("/v1/programs/details/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_curriculum_round_trip_through_details() {
    let Some(state) = common::try_build().await else {
        return;
    };
    let client = common::app(state.clone());
    let email = test_data::unique_email("author");
    let mentor_id = common::db::create_mentor(&state.pool, &email, 0, 0.0)
        .await
        .expect("Failed to create mentor");
    let program_id =
        common::db::create_program(&state.pool, mentor_id, "Rust", "programming", "draft")
            .await
            .expect("Failed to create program");
    let token = create_test_token(mentor_id, &email, Role::Mentor);
    let module_ids = [Uuid::new_v4(), Uuid::new_v4()];

    let response = client
        .put_json_with_bearer(
            &format!("/v1/programs/{program_id}/curriculum"),
            &curriculum_payload(module_ids),
            &token,
        )
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["total_duration_minutes"], 90);

    // Saving again with the same ids replaces rather than collides
    client
        .put_json_with_bearer(
            &format!("/v1/programs/{program_id}/curriculum"),
            &curriculum_payload(module_ids),
            &token,
        )
        .await
        .assert_status(StatusCode::OK);

    let response = client
        .get_with_bearer(&format!("/v1/programs/details/{program_id}"), &token)
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    let program = &body["program"];
    assert_eq!(program["total_duration_minutes"], 90);
    assert_eq!(program["modules"][0]["id"], module_ids[0].to_string());
    assert_eq!(program["modules"][0]["order"], 1);
    assert_eq!(program["modules"][0]["topics"][0]["type"], "live_session");
    assert_eq!(program["modules"][1]["title"], "Ownership");
    assert_eq!(program["modules"][1]["topics"][1]["title"], "Lifetimes quiz");

    common::db::delete_user_by_email(&state.pool, &email)
        .await
        .expect("cleanup");
}

#[tokio::test]
async fn test_curriculum_with_blank_title_rejected() {
    let Some(state) = common::try_build().await else {
        return;
    };
    let client = common::app(state.clone());
    let email = test_data::unique_email("blank");
    let mentor_id = common::db::create_mentor(&state.pool, &email, 0, 0.0)
        .await
        .expect("Failed to create mentor");
    let program_id =
        common::db::create_program(&state.pool, mentor_id, "Go", "programming", "draft")
            .await
            .expect("Failed to create program");
    let token = create_test_token(mentor_id, &email, Role::Mentor);

    let mut payload = curriculum_payload([Uuid::new_v4(), Uuid::new_v4()]);
    payload["modules"][0]["title"] = json!("  ");

    let response = client
        .put_json_with_bearer(
            &format!("/v1/programs/{program_id}/curriculum"),
            &payload,
            &token,
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.error_message().contains("has no title"));

    common::db::delete_user_by_email(&state.pool, &email)
        .await
        .expect("cleanup");
}

#[tokio::test]
async fn test_curriculum_edit_by_other_mentor_forbidden() {
    let Some(state) = common::try_build().await else {
        return;
    };
    let client = common::app(state.clone());
    let owner_email = test_data::unique_email("owner");
    let other_email = test_data::unique_email("other");
    let owner_id = common::db::create_mentor(&state.pool, &owner_email, 0, 0.0)
        .await
        .expect("Failed to create mentor");
    let other_id = common::db::create_mentor(&state.pool, &other_email, 0, 0.0)
        .await
        .expect("Failed to create mentor");
    let program_id =
        common::db::create_program(&state.pool, owner_id, "Elixir", "programming", "published")
            .await
            .expect("Failed to create program");

    let response = client
        .put_json_with_bearer(
            &format!("/v1/programs/{program_id}/curriculum"),
            &curriculum_payload([Uuid::new_v4(), Uuid::new_v4()]),
            &create_test_token(other_id, &other_email, Role::Mentor),
        )
        .await;

    response.assert_status(StatusCode::FORBIDDEN);

    for email in [owner_email, other_email] {
        common::db::delete_user_by_email(&state.pool, &email)
            .await
            .expect("cleanup");
    }
}

#[tokio::test]
async fn test_curriculum_edit_by_mentee_forbidden() {
    let client = common::app(TestStateBuilder::new().build_lazy());
    let token = create_test_token(Uuid::new_v4(), "mentee@example.com", Role::Mentee);

    let response = client
        .put_json_with_bearer(
            &format!("/v1/programs/{}/curriculum", Uuid::new_v4()),
            &curriculum_payload([Uuid::new_v4(), Uuid::new_v4()]),
            &token,
        )
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_draft_program_hidden_from_other_users() {
    let Some(state) = common::try_build().await else {
        return;
    };
    let client = common::app(state.clone());
    let mentor_email = test_data::unique_email("drafter");
    let mentee_email = test_data::unique_email("curious");
    let mentor_id = common::db::create_mentor(&state.pool, &mentor_email, 0, 0.0)
        .await
        .expect("Failed to create mentor");
    let mentee_id = common::db::create_user(&state.pool, &mentee_email, Role::Mentee)
        .await
        .expect("Failed to create mentee");
    let program_id =
        common::db::create_program(&state.pool, mentor_id, "Secret", "design", "draft")
            .await
            .expect("Failed to create program");
    let uri = format!("/v1/programs/details/{program_id}");

    let as_mentee = client
        .get_with_bearer(&uri, &create_test_token(mentee_id, &mentee_email, Role::Mentee))
        .await;
    as_mentee.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(as_mentee.error_message(), "Program not found");

    let as_admin = client
        .get_with_bearer(
            &uri,
            &create_test_token(Uuid::new_v4(), "admin@example.com", Role::Admin),
        )
        .await;
    as_admin.assert_status(StatusCode::OK);
    let body: Value = as_admin.json();
    assert_eq!(body["program"]["total_duration_minutes"], 0);
    assert!(body["program"]["modules"].as_array().expect("modules").is_empty());

    for email in [mentor_email, mentee_email] {
        common::db::delete_user_by_email(&state.pool, &email)
            .await
            .expect("cleanup");
    }
}

#[tokio::test]
async fn test_enroll_then_duplicate_conflict() {
    let Some(state) = common::try_build().await else {
        return;
    };
    let client = common::app(state.clone());
    let mentor_email = test_data::unique_email("instructor");
    let mentee_email = test_data::unique_email("learner");
    let mentor_id = common::db::create_mentor(&state.pool, &mentor_email, 0, 0.0)
        .await
        .expect("Failed to create mentor");
    let mentee_id = common::db::create_user(&state.pool, &mentee_email, Role::Mentee)
        .await
        .expect("Failed to create mentee");
    let program_id =
        common::db::create_program(&state.pool, mentor_id, "Data", "science", "published")
            .await
            .expect("Failed to create program");
    let token = create_test_token(mentee_id, &mentee_email, Role::Mentee);
    let uri = format!("/v1/programs/{program_id}/enroll");

    let first = client.post_with_bearer(&uri, &token).await;
    first.assert_status(StatusCode::CREATED);

    let second = client.post_with_bearer(&uri, &token).await;
    second.assert_status(StatusCode::CONFLICT);
    assert!(second.error_message().contains("already exists"));

    let details = client
        .get_with_bearer(&format!("/v1/programs/details/{program_id}"), &token)
        .await;
    let body: Value = details.json();
    assert_eq!(body["program"]["enrolled_count"], 1);

    for email in [mentor_email, mentee_email] {
        common::db::delete_user_by_email(&state.pool, &email)
            .await
            .expect("cleanup");
    }
}

#[tokio::test]
async fn test_enroll_in_draft_not_found() {
    let Some(state) = common::try_build().await else {
        return;
    };
    let client = common::app(state.clone());
    let mentor_email = test_data::unique_email("unready");
    let mentor_id = common::db::create_mentor(&state.pool, &mentor_email, 0, 0.0)
        .await
        .expect("Failed to create mentor");
    let program_id =
        common::db::create_program(&state.pool, mentor_id, "Later", "science", "draft")
            .await
            .expect("Failed to create program");

    let response = client
        .post_with_bearer(
            &format!("/v1/programs/{program_id}/enroll"),
            &create_test_token(Uuid::new_v4(), "mentee@example.com", Role::Mentee),
        )
        .await;

    response.assert_status(StatusCode::NOT_FOUND);

    common::db::delete_user_by_email(&state.pool, &mentor_email)
        .await
        .expect("cleanup");
}

#[tokio::test]
async fn test_enroll_as_mentor_forbidden() {
    let client = common::app(TestStateBuilder::new().build_lazy());

    let response = client
        .post_with_bearer(
            &format!("/v1/programs/{}/enroll", Uuid::new_v4()),
            &create_test_token(Uuid::new_v4(), "mentor@example.com", Role::Mentor),
        )
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
