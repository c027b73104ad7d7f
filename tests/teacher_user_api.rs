//! 教师查询与用户资料接口

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;

#[tokio::test]
async fn teachers_are_listed_and_found() {
    let app = TestApp::new();
    let user = app.add_user("john.doe@example.com", false).await;
    let token = app.token_for(&user.email);
    let margot = app.store.insert_teacher("Margot", "DELAHAYE");
    app.store.insert_teacher("Hélène", "THIERCELIN");

    let (status, body) = app
        .send(Method::GET, "/api/teacher", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let teachers = body.as_array().unwrap();
    assert_eq!(teachers.len(), 2);
    assert_eq!(teachers[0]["firstName"], "Margot");
    assert_eq!(teachers[1]["firstName"], "Hélène");

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/teacher/{}", margot.id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], margot.id);
    assert_eq!(body["firstName"], "Margot");
    assert_eq!(body["lastName"], "DELAHAYE");
}

#[tokio::test]
async fn missing_teacher_is_not_found() {
    let app = TestApp::new();
    let user = app.add_user("john.doe@example.com", false).await;
    let token = app.token_for(&user.email);

    let (status, _) = app
        .send(Method::GET, "/api/teacher/10", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_is_found_without_password() {
    let app = TestApp::new();
    let user = app.add_user("john.doe@example.com", false).await;
    let token = app.token_for(&user.email);

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/user/{}", user.id),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id);
    assert_eq!(body["email"], "john.doe@example.com");
    assert_eq!(body["firstName"], "john");
    assert_eq!(body["lastName"], "doe");
    assert_eq!(body["admin"], false);
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn user_lookup_errors() {
    let app = TestApp::new();
    let user = app.add_user("john.doe@example.com", false).await;
    let token = app.token_for(&user.email);

    let (missing, _) = app
        .send(Method::GET, "/api/user/101", Some(&token), None)
        .await;
    let (invalid, _) = app
        .send(Method::GET, "/api/user/invalid-format", Some(&token), None)
        .await;

    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(invalid, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_can_delete_own_account() {
    let app = TestApp::new();
    let user = app.add_user("john.doe@example.com", false).await;
    let token = app.token_for(&user.email);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/user/{}", user.id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // 账号删除后原令牌失效
    let (status, _) = app
        .send(Method::GET, "/api/session", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleting_missing_user_is_not_found() {
    let app = TestApp::new();
    let user = app.add_user("john.doe@example.com", false).await;
    let token = app.token_for(&user.email);

    let (status, _) = app
        .send(Method::DELETE, "/api/user/101", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_someone_else_is_unauthorized() {
    let app = TestApp::new();
    let user = app.add_user("john.doe@example.com", false).await;
    let admin = app.add_user("yoga@studio.com", true).await;
    let token = app.token_for(&user.email);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/user/{}", admin.id),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleted_user_leaves_sessions() {
    let app = TestApp::new();
    let user = app.add_user("john.doe@example.com", false).await;
    let token = app.token_for(&user.email);
    let session = app.add_session("Morning flow", None).await;

    app.send(
        Method::POST,
        &format!("/api/session/{}/participate/{}", session.id, user.id),
        Some(&token),
        None,
    )
    .await;
    app.send(
        Method::DELETE,
        &format!("/api/user/{}", user.id),
        Some(&token),
        None,
    )
    .await;

    let admin = app.add_user("yoga@studio.com", true).await;
    let admin_token = app.token_for(&admin.email);
    let (_, body) = app
        .send(
            Method::GET,
            &format!("/api/session/{}", session.id),
            Some(&admin_token),
            None,
        )
        .await;
    assert_eq!(body["users"], serde_json::json!([]));
}
