//! User management controller (ADMIN only).
//!
//! Same routes as the generic controller, but passwords are hashed before
//! saving, usernames must be unique and unknown ids send the browser to
//! `/error`.

use crate::api::binding::{self, FormPairs};
use crate::api::views::{self, FormField, InputKind, ListRow};
use crate::auth::Principal;
use crate::error::AppResult;
use crate::models::UserForm;
use crate::state::AppState;
use crate::validation::{Validate, ValidationErrors};
use axum::Router;
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use std::sync::Arc;
use tracing::{debug, info};

const LIST_PATH: &str = "/user/list";
const ERROR_PATH: &str = "/error";

/// Field error for a username held by another user.
pub const USERNAME_TAKEN_MESSAGE: &str = "Username already exists";

const FIELDS: &[FormField] = &[
    FormField::listed("username", "Username", InputKind::Text),
    FormField::form_only("password", "Password", InputKind::Password),
    FormField::listed("fullname", "Full name", InputKind::Text),
    FormField::listed("role", "Role", InputKind::Select(&["ADMIN", "USER"])),
];

fn form_values(form: &UserForm) -> Vec<String> {
    vec![
        form.username.clone(),
        String::new(),
        form.fullname.clone(),
        form.role.clone(),
    ]
}

/// Binds the submitted form, evaluates every rule and checks that no other
/// user holds the username.
async fn bind_checked(
    state: &AppState,
    pairs: FormPairs,
    id: Option<i32>,
) -> AppResult<(UserForm, ValidationErrors)> {
    let (mut form, mut errors) = binding::bind::<UserForm>(FIELDS, pairs)?;
    if id.is_some() {
        form.id = id;
    }
    if let Err(violations) = form.validate() {
        errors.merge(violations);
    }
    if !errors.has_field("username")
        && let Some(holder) = state.users.find_by_username(form.username.trim()).await?
        && holder.id != form.id
    {
        errors.add("username", USERNAME_TAKEN_MESSAGE);
    }
    Ok((form, errors))
}

fn render_form(title: &str, action: &str, form: &UserForm, errors: Option<&ValidationErrors>) -> Html<String> {
    views::form_page(title, action, FIELDS, &form_values(form), errors)
}

/// Lists all users.
pub async fn list(
    State(state): State<Arc<AppState>>,
    principal: Principal,
) -> AppResult<Html<String>> {
    let rows: Vec<ListRow> = state
        .users
        .find_all()
        .await?
        .iter()
        .map(|user| ListRow {
            id: user.id,
            values: form_values(&UserForm::from_user(user)),
        })
        .collect();

    Ok(views::list_page("User List", "user", &principal.username, FIELDS, &rows, false))
}

/// Renders the blank creation form.
pub async fn add_form() -> Html<String> {
    render_form("Add User", "/user/validate", &UserForm::default(), None)
}

/// Validates, hashes the password and saves a new user.
pub async fn validate(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<FormPairs>,
) -> AppResult<Response> {
    let (form, errors) = bind_checked(&state, pairs, None).await?;
    if !errors.is_empty() {
        debug!("Rejected user with {} validation errors", errors.len());
        return Ok(render_form("Add User", "/user/validate", &form, Some(&errors)).into_response());
    }

    let hash = state.passwords.encode(&form.password)?;
    let saved = state.users.save(form.into_user(hash)).await?;
    info!("Saved user {} {:?}", saved.username, saved.id);
    Ok(Redirect::to(LIST_PATH).into_response())
}

/// Renders the update form with a blank password.
pub async fn show_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(user) = state.users.find_by_id(id).await? else {
        debug!("No user with id {}", id);
        return Ok(Redirect::to(ERROR_PATH).into_response());
    };

    let action = format!("/user/update/{}", id);
    Ok(render_form("Update User", &action, &UserForm::from_user(&user), None).into_response())
}

/// Validates, re-hashes the password and overwrites a user.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(pairs): Form<FormPairs>,
) -> AppResult<Response> {
    if state.users.find_by_id(id).await?.is_none() {
        debug!("No user with id {}", id);
        return Ok(Redirect::to(ERROR_PATH).into_response());
    }

    let (form, errors) = bind_checked(&state, pairs, Some(id)).await?;
    if !errors.is_empty() {
        debug!("Rejected update of user {} with {} validation errors", id, errors.len());
        let action = format!("/user/update/{}", id);
        return Ok(render_form("Update User", &action, &form, Some(&errors)).into_response());
    }

    let hash = state.passwords.encode(&form.password)?;
    let saved = state.users.save(form.into_user(hash)).await?;
    info!("Updated user {} {:?}", saved.username, saved.id);
    Ok(Redirect::to(LIST_PATH).into_response())
}

/// Deletes an existing user.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    if state.users.find_by_id(id).await?.is_none() {
        debug!("No user with id {}", id);
        return Ok(Redirect::to(ERROR_PATH));
    }

    state.users.delete_by_id(id).await?;
    info!("Deleted user {}", id);
    Ok(Redirect::to(LIST_PATH))
}

/// User management routes.
pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/list", get(list))
        .route("/user/add", get(add_form))
        .route("/user/validate", post(validate))
        .route("/user/update/{id}", get(show_update).post(update))
        .route("/user/delete/{id}", get(delete))
}
