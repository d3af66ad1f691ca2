use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::analytics::{Analytics, LogAnalytics};
use crate::forms::saved_filters::{EditSavedFilterForm, SaveFilterForm};
use crate::repository::{DieselRepository, SavedFilterReader, SavedFilterWriter};
use crate::services::filters::NormalizedFilter;
use crate::services::saved_filters::SessionSource;
use crate::services::{ServiceError, saved_filters};

#[get("/v1/saved-filters")]
/// Return the caller's saved filters, most recently used first.
pub async fn list_saved_filters(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    list_response(repo.get_ref(), &user)
}

#[post("/v1/saved-filters")]
/// Save the submitted filter under a name.
pub async fn create_saved_filter(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    analytics: web::Data<LogAnalytics>,
    form: web::Json<SaveFilterForm>,
) -> impl Responder {
    create_response(
        repo.get_ref(),
        analytics.get_ref(),
        &user,
        form.into_inner(),
    )
}

#[get("/v1/saved-filters/{filter_id}")]
/// Return one of the caller's saved filters.
pub async fn show_saved_filter(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    show_response(repo.get_ref(), &user, path.into_inner())
}

#[post("/v1/saved-filters/{filter_id}/update")]
/// Rename a saved filter or replace its contents.
pub async fn update_saved_filter(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditSavedFilterForm>,
) -> impl Responder {
    update_response(repo.get_ref(), &user, path.into_inner(), form.into_inner())
}

#[post("/v1/saved-filters/{filter_id}/delete")]
/// Delete a saved filter owned by the caller.
pub async fn delete_saved_filter(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    delete_response(repo.get_ref(), &user, path.into_inner())
}

#[post("/v1/saved-filters/{filter_id}/apply")]
/// Mark a saved filter as used and return it normalized for the filter panels.
pub async fn apply_saved_filter(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    analytics: web::Data<LogAnalytics>,
) -> impl Responder {
    apply_response(
        repo.get_ref(),
        analytics.get_ref(),
        &user,
        path.into_inner(),
    )
}

fn list_response<R, S>(repo: &R, session: &S) -> HttpResponse
where
    R: SavedFilterReader + ?Sized,
    S: SessionSource + ?Sized,
{
    match saved_filters::get_saved_filters(repo, session) {
        Ok(filters) => HttpResponse::Ok().json(filters),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to list saved filters: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn create_response<R, A, S>(
    repo: &R,
    analytics: &A,
    session: &S,
    form: SaveFilterForm,
) -> HttpResponse
where
    R: SavedFilterWriter + ?Sized,
    A: Analytics + ?Sized,
    S: SessionSource + ?Sized,
{
    match saved_filters::save_filter(repo, analytics, session, form) {
        Ok(saved_filter) => HttpResponse::Created().json(saved_filter),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Form(message)) => HttpResponse::BadRequest().body(message),
        Err(err) => {
            log::error!("Failed to save filter: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn show_response<R, S>(repo: &R, session: &S, filter_id: i32) -> HttpResponse
where
    R: SavedFilterReader + ?Sized,
    S: SessionSource + ?Sized,
{
    match saved_filters::get_saved_filter_by_id(repo, session, filter_id) {
        Ok(Some(saved_filter)) => HttpResponse::Ok().json(saved_filter),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to load saved filter {filter_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn update_response<R, S>(
    repo: &R,
    session: &S,
    filter_id: i32,
    form: EditSavedFilterForm,
) -> HttpResponse
where
    R: SavedFilterWriter + ?Sized,
    S: SessionSource + ?Sized,
{
    match saved_filters::update_saved_filter(repo, session, filter_id, form) {
        Ok(Some(saved_filter)) => HttpResponse::Ok().json(saved_filter),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Form(message)) => HttpResponse::BadRequest().body(message),
        Err(err) => {
            log::error!("Failed to update saved filter {filter_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn delete_response<R, S>(repo: &R, session: &S, filter_id: i32) -> HttpResponse
where
    R: SavedFilterWriter + ?Sized,
    S: SessionSource + ?Sized,
{
    match saved_filters::delete_saved_filter(repo, session, filter_id) {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to delete saved filter {filter_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn apply_response<R, A, S>(
    repo: &R,
    analytics: &A,
    session: &S,
    filter_id: i32,
) -> HttpResponse
where
    R: SavedFilterReader + SavedFilterWriter + ?Sized,
    A: Analytics + ?Sized,
    S: SessionSource + ?Sized,
{
    let applied = saved_filters::apply_saved_filter(repo, analytics, session, filter_id)
        .and_then(|params| {
            params
                .map(|params| NormalizedFilter::from_params(&params))
                .transpose()
        });

    match applied {
        Ok(Some(normalized)) => HttpResponse::Ok().json(normalized),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to apply saved filter {filter_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
