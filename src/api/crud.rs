//! Generic controller for the business records.
//!
//! Every record kind exposes the same six routes under `/{path}`:
//!
//! | Method | Route | Outcome |
//! |--------|-------|---------|
//! | GET | `/list` | list page with all records and the current username |
//! | GET | `/add` | blank form |
//! | POST | `/validate` | save and redirect to the list, or re-render with errors |
//! | GET | `/update/{id}` | filled form, or `list?error=true` when the id is unknown |
//! | POST | `/update/{id}` | overwrite and redirect, or re-render with errors |
//! | GET | `/delete/{id}` | delete and redirect to the list |
//!
//! A malformed number or date is reported next to its field like any other
//! violated rule.

use crate::api::binding::{self, FormPairs};
use crate::api::views::{self, FormField, ListRow};
use crate::auth::Principal;
use crate::db::Entity;
use crate::error::AppResult;
use crate::service::CrudService;
use crate::state::AppState;
use crate::validation::{Validate, ValidationErrors};
use axum::Router;
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};

/// A record kind served by the generic controller.
pub trait Resource: Entity + Validate + DeserializeOwned + Default {
    /// Path segment, e.g. `bidList`.
    const PATH: &'static str;

    /// Title of the list page.
    const TITLE: &'static str;

    /// Form fields, in display order.
    const FIELDS: &'static [FormField];

    /// Current field values for the form, aligned with [`Resource::FIELDS`].
    fn form_values(&self) -> Vec<String>;

    /// Service owning this record kind.
    fn service(state: &AppState) -> &CrudService<Self>;
}

/// Query string of the list page.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Present when a lookup failed before redirecting here.
    pub error: Option<String>,
}

fn list_path<T: Resource>() -> String {
    format!("/{}/list", T::PATH)
}

/// Binds the submitted form and evaluates every rule. The path id, when
/// given, replaces any submitted one.
fn bind_checked<T: Resource>(pairs: FormPairs, id: Option<i32>) -> AppResult<(T, ValidationErrors)> {
    let (mut entity, mut errors) = binding::bind::<T>(T::FIELDS, pairs)?;
    if let Some(id) = id {
        entity.set_id(id);
    }
    if let Err(violations) = entity.validate() {
        errors.merge(violations);
    }
    Ok((entity, errors))
}

fn render_form<T: Resource>(action: String, entity: &T, errors: Option<&ValidationErrors>) -> Html<String> {
    let title = if entity.id().is_some() {
        format!("Update {}", T::TITLE)
    } else {
        format!("Add {}", T::TITLE)
    };
    views::form_page(&title, &action, T::FIELDS, &entity.form_values(), errors)
}

/// Lists all records.
pub async fn list<T: Resource>(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Query(query): Query<ListQuery>,
) -> AppResult<Html<String>> {
    let rows: Vec<ListRow> = T::service(&state)
        .find_all()
        .await?
        .iter()
        .map(|entity| ListRow {
            id: entity.id(),
            values: entity.form_values(),
        })
        .collect();

    Ok(views::list_page(
        T::TITLE,
        T::PATH,
        &principal.username,
        T::FIELDS,
        &rows,
        query.error.is_some(),
    ))
}

/// Renders the blank creation form.
pub async fn add_form<T: Resource>() -> Html<String> {
    render_form(format!("/{}/validate", T::PATH), &T::default(), None)
}

/// Validates and saves a new record.
pub async fn validate<T: Resource>(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<FormPairs>,
) -> AppResult<Response> {
    let (entity, errors) = bind_checked::<T>(pairs, None)?;
    if !errors.is_empty() {
        debug!("Rejected {} with {} validation errors", T::PATH, errors.len());
        let action = format!("/{}/validate", T::PATH);
        return Ok(render_form(action, &entity, Some(&errors)).into_response());
    }

    let saved = T::service(&state).save(entity).await?;
    info!("Saved {} {:?}", T::PATH, saved.id());
    Ok(Redirect::to(&list_path::<T>()).into_response())
}

/// Renders the update form for an existing record.
pub async fn show_update<T: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    match T::service(&state).find_by_id(id).await? {
        Some(entity) => {
            let action = format!("/{}/update/{}", T::PATH, id);
            Ok(render_form(action, &entity, None).into_response())
        }
        None => {
            debug!("No {} with id {}", T::PATH, id);
            Ok(Redirect::to(&format!("{}?error=true", list_path::<T>())).into_response())
        }
    }
}

/// Validates and overwrites a record. The id in the path wins over any id
/// in the submitted form.
pub async fn update<T: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(pairs): Form<FormPairs>,
) -> AppResult<Response> {
    let (entity, errors) = bind_checked::<T>(pairs, Some(id))?;
    if !errors.is_empty() {
        debug!("Rejected update of {} {} with {} validation errors", T::PATH, id, errors.len());
        let action = format!("/{}/update/{}", T::PATH, id);
        return Ok(render_form(action, &entity, Some(&errors)).into_response());
    }

    let saved = T::service(&state).save(entity).await?;
    info!("Updated {} {:?}", T::PATH, saved.id());
    Ok(Redirect::to(&list_path::<T>()).into_response())
}

/// Deletes a record. Unknown ids are ignored.
pub async fn delete<T: Resource>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    T::service(&state).delete_by_id(id).await?;
    info!("Deleted {} {}", T::PATH, id);
    Ok(Redirect::to(&list_path::<T>()))
}

/// Routes of one record kind.
pub fn resource_routes<T: Resource>() -> Router<Arc<AppState>> {
    let base = format!("/{}", T::PATH);
    Router::new()
        .route(&format!("{}/list", base), get(list::<T>))
        .route(&format!("{}/add", base), get(add_form::<T>))
        .route(&format!("{}/validate", base), post(validate::<T>))
        .route(
            &format!("{}/update/{{id}}", base),
            get(show_update::<T>).post(update::<T>),
        )
        .route(&format!("{}/delete/{{id}}", base), get(delete::<T>))
}
