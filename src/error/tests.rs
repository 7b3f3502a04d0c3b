//! Unit tests for error module.

use super::*;
use axum::http::header;

// ============================================================================
// AppError Display Tests
// ============================================================================

#[test]
fn test_app_error_unauthenticated_display() {
    let error = AppError::Unauthenticated;
    assert_eq!(format!("{}", error), "Authentication required");
}

#[test]
fn test_app_error_forbidden_display() {
    let error = AppError::Forbidden("/user/list".to_string());
    assert_eq!(format!("{}", error), "Access denied for /user/list");
}

#[test]
fn test_app_error_database_display() {
    let error = AppError::Database("connection refused".to_string());
    assert_eq!(format!("{}", error), "Database error: connection refused");
}

#[test]
fn test_app_error_internal_display() {
    let error = AppError::Internal("boom".to_string());
    assert_eq!(format!("{}", error), "Internal server error: boom");
}

#[test]
fn test_from_sqlx_error() {
    let error: AppError = sqlx::Error::RowNotFound.into();
    assert!(matches!(error, AppError::Database(_)));
}

// ============================================================================
// IntoResponse Tests
// ============================================================================

#[test]
fn test_unauthenticated_redirects_to_login() {
    let response = AppError::Unauthenticated.into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        LOGIN_PATH
    );
}

#[test]
fn test_forbidden_renders_403() {
    let response = AppError::Forbidden("/admin".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[test]
fn test_database_error_renders_500() {
    let response = AppError::Database("down".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_database_error_hides_details() {
    let response = AppError::Database("password=secret".to_string()).into_response();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(INTERNAL_MESSAGE));
    assert!(!html.contains("secret"));
}
