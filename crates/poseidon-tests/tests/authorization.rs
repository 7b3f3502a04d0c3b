//! Login, logout and path-based authorization tests.

use axum::http::StatusCode;
use poseidon_backend::auth::Role;
use poseidon_backend::config::SecurityConfig;
use poseidon_backend::state::Repositories;
use poseidon_tests::{
    STRONG_PASSWORD, app, body_string, get, location, login, login_as, post_form, seed_user,
    send, state_with_security, test_state,
};

#[tokio::test]
async fn test_public_pages_need_no_principal() {
    let state = test_state();
    let app = app(&state);

    let response = send(&app, get("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/error", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Forbidden access!"));

    let response = send(&app, get("/login", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_page_redirects_to_login() {
    let state = test_state();
    let app = app(&state);

    for uri in ["/bidList/list", "/user/list", "/trade/add", "/somewhere"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), Some("/login"), "{}", uri);
    }
}

#[tokio::test]
async fn test_user_role_denied_user_management() {
    let state = test_state();
    let app = app(&state);
    let cookie = login_as(&state, &app, "user1", Role::User).await;

    let response = send(&app, get("/user/list", Some(cookie.as_str()))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(body_string(response).await.contains("Forbidden access!"));

    let response = send(&app, get("/admin/home", Some(cookie.as_str()))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_role_allowed_user_management() {
    let state = test_state();
    let app = app(&state);
    let cookie = login_as(&state, &app, "admin", Role::Admin).await;

    let response = send(&app, get("/user/list", Some(cookie.as_str()))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("admin full name"));
}

#[tokio::test]
async fn test_both_roles_reach_business_records() {
    let state = test_state();
    let app = app(&state);
    let user = login_as(&state, &app, "user1", Role::User).await;
    let admin = login_as(&state, &app, "admin", Role::Admin).await;

    for entity in ["bidList", "curvePoint", "rating", "ruleName", "trade"] {
        let uri = format!("/{}/list", entity);
        for cookie in [&user, &admin] {
            let response = send(&app, get(&uri, Some(cookie.as_str()))).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }
}

#[tokio::test]
async fn test_list_page_shows_current_username() {
    let state = test_state();
    let app = app(&state);
    let cookie = login_as(&state, &app, "trader7", Role::User).await;

    let response = send(&app, get("/rating/list", Some(cookie.as_str()))).await;
    assert!(body_string(response).await.contains("trader7"));
}

#[tokio::test]
async fn test_unmapped_path_only_needs_authentication() {
    let state = test_state();
    let app = app(&state);
    let cookie = login_as(&state, &app, "user1", Role::User).await;

    let response = send(&app, get("/somewhere", Some(cookie.as_str()))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let state = test_state();
    let app = app(&state);
    seed_user(&state, "user1", Role::User).await;

    let response = send(
        &app,
        post_form("/login", &[("username", "user1"), ("password", "Wrong123!")], None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login?error"));
    assert!(state.sessions.is_empty());

    let response = send(
        &app,
        post_form("/login", &[("username", "nobody"), ("password", STRONG_PASSWORD)], None),
    )
    .await;
    assert_eq!(location(&response), Some("/login?error"));
}

#[tokio::test]
async fn test_session_created_only_on_login() {
    let state = test_state();
    let app = app(&state);
    seed_user(&state, "user1", Role::User).await;

    send(&app, get("/", None)).await;
    send(&app, get("/bidList/list", None)).await;
    assert!(state.sessions.is_empty());

    login(&app, "user1", STRONG_PASSWORD).await;
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let state = test_state();
    let app = app(&state);
    let cookie = login_as(&state, &app, "user1", Role::User).await;

    let response = send(&app, post_form("/app-logout", &[], Some(cookie.as_str()))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    assert!(state.sessions.is_empty());

    let response = send(&app, get("/bidList/list", Some(cookie.as_str()))).await;
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_unknown_session_token_is_unauthenticated() {
    let state = test_state();
    let app = app(&state);

    let response = send(&app, get("/bidList/list", Some("SESSION=forged"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_idle_session_expires() {
    let security = SecurityConfig {
        session_timeout_secs: 0,
        ..SecurityConfig::default()
    };
    let state = state_with_security(Repositories::in_memory(), &security);
    let app = app(&state);
    seed_user(&state, "user1", Role::User).await;

    for _ in 0..49 {
        login(&app, "user1", STRONG_PASSWORD).await;
    }
    let cookie = login(&app, "user1", STRONG_PASSWORD).await;
    assert_eq!(state.sessions.len(), 1);

    let response = send(&app, get("/bidList/list", Some(cookie.as_str()))).await;
    assert_eq!(location(&response), Some("/login"));
    assert!(state.sessions.is_empty());
}
