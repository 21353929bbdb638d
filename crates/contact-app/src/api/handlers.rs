//! HTTP request handlers.

use super::session::{set_flash, take_flash};
use super::types::{DeleteForm, HealthResponse};
use super::AppState;
use crate::error::AppError;
use crate::validation::{validate_add, validate_edit, ContactForm, ValidationErrors};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use contact_store::{DeleteOutcome, StoreError, UpdateOutcome};
use minijinja::context;
use tracing::{info, warn};

/// Flash shown after a successful add.
pub const MSG_ADDED: &str = "Data kontak berhasil ditambahkan!";
/// Flash shown after a delete.
pub const MSG_DELETED: &str = "Data kontak berhasil dihapus!";
/// Flash shown after a successful edit.
pub const MSG_UPDATED: &str = "Data kontak berhasil diubah!";

/// Where every successful mutation lands.
const CONTACT_LIST: &str = "/contact";

fn redirect_to_list(jar: CookieJar) -> Response {
    (StatusCode::FOUND, jar, [(header::LOCATION, CONTACT_LIST)]).into_response()
}

fn render_add_errors(state: &AppState, errors: &ValidationErrors) -> Result<Response, AppError> {
    let page = state.views.render(
        "add.html",
        context! {
            title => "Form tambah data kontak",
            errors => errors,
        },
    )?;
    Ok(page.into_response())
}

fn render_edit_errors(
    state: &AppState,
    form: &ContactForm,
    errors: &ValidationErrors,
) -> Result<Response, AppError> {
    let page = state.views.render(
        "edit.html",
        context! {
            title => "Form ubah data kontak",
            contact => form,
            old_name => &form.old_name,
            errors => errors,
        },
    )?;
    Ok(page.into_response())
}

fn render_not_found(state: &AppState, name: Option<&str>) -> Result<Response, AppError> {
    let page = state.views.render(
        "not_found.html",
        context! {
            title => "Halaman Tidak Ditemukan",
            name => name,
        },
    )?;
    Ok((StatusCode::NOT_FOUND, page).into_response())
}

/// Landing page.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state
        .views
        .render("index.html", context! { title => "Halaman Index" })
}

/// About page.
pub async fn about(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state
        .views
        .render("about.html", context! { title => "Halaman About" })
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.store.health_check().await?;
    let contacts = state.store.count().await?;
    let sessions = state.sessions.session_count().await;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        contacts,
        sessions,
    }))
}

/// List every contact, consuming any pending flash message.
pub async fn list_contacts(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    let contacts = state.store.list().await?;
    let msg = take_flash(&state, &jar).await?;

    state.views.render(
        "contact.html",
        context! {
            title => "Halaman Contact",
            contacts => contacts,
            msg => msg,
        },
    )
}

/// Empty add form.
pub async fn add_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state
        .views
        .render("add.html", context! { title => "Halaman Tambah Kontak" })
}

/// Create a contact from the add form.
pub async fn create_contact(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    let errors = validate_add(state.store.as_ref(), &form).await?;
    if !errors.is_empty() {
        info!(errors = errors.len(), "Add submission rejected");
        return render_add_errors(&state, &errors);
    }

    match state.store.insert(form.fields()).await {
        Ok(contact) => info!(id = %contact.id, name = %contact.name, "Contact added"),
        Err(StoreError::DuplicateName(name)) => {
            warn!(%name, "Name claimed concurrently, rejecting add");
            return render_add_errors(&state, &ValidationErrors::duplicate_name(name));
        }
        Err(e) => return Err(e.into()),
    }

    let jar = set_flash(&state, jar, MSG_ADDED).await?;
    Ok(redirect_to_list(jar))
}

/// Delete the contact named in the form body.
///
/// A name that matches nothing still reports success.
pub async fn delete_contact(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    match state.store.delete_by_name(&form.name).await? {
        DeleteOutcome::Deleted => info!(name = %form.name, "Contact deleted"),
        DeleteOutcome::NotFound => warn!(name = %form.name, "Delete matched no contact"),
    }

    let jar = set_flash(&state, jar, MSG_DELETED).await?;
    Ok(redirect_to_list(jar))
}

/// Edit form pre-filled with the named contact.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let Some(contact) = state.store.find_by_name(&name).await? else {
        return render_not_found(&state, Some(&name));
    };

    let page = state.views.render(
        "edit.html",
        context! {
            title => "Halaman Edit Contact",
            old_name => &contact.name,
            contact => contact,
        },
    )?;
    Ok(page.into_response())
}

/// Overwrite a contact from the edit form.
///
/// An id that matches nothing still reports success.
pub async fn update_contact(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    let errors = validate_edit(state.store.as_ref(), &form).await?;
    if !errors.is_empty() {
        info!(id = %form.id, errors = errors.len(), "Edit submission rejected");
        return render_edit_errors(&state, &form, &errors);
    }

    match state.store.update_by_id(&form.id, form.fields()).await {
        Ok(UpdateOutcome::Updated) => info!(id = %form.id, name = %form.name, "Contact updated"),
        Ok(UpdateOutcome::NotFound) => warn!(id = %form.id, "Update matched no contact"),
        Err(StoreError::DuplicateName(name)) => {
            warn!(%name, "Name claimed concurrently, rejecting edit");
            return render_edit_errors(&state, &form, &ValidationErrors::duplicate_name(name));
        }
        Err(e) => return Err(e.into()),
    }

    let jar = set_flash(&state, jar, MSG_UPDATED).await?;
    Ok(redirect_to_list(jar))
}

/// Detail page of the named contact.
pub async fn show_contact(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let Some(contact) = state.store.find_by_name(&name).await? else {
        return render_not_found(&state, Some(&name));
    };

    let page = state.views.render(
        "detail.html",
        context! {
            title => "Halaman Detail Contact",
            contact => contact,
        },
    )?;
    Ok(page.into_response())
}

/// Fallback for unknown paths.
pub async fn not_found(State(state): State<AppState>) -> Result<Response, AppError> {
    render_not_found(&state, None)
}
