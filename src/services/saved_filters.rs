use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::analytics::{Analytics, AnalyticsEvent};
use crate::domain::filter::FilterParams;
use crate::domain::saved_filter::{NewSavedFilter, SavedFilter, UpdateSavedFilter};
use crate::forms::saved_filters::{EditSavedFilterForm, SaveFilterForm};
use crate::repository::{SavedFilterReader, SavedFilterWriter};
use crate::services::{ServiceError, ServiceResult};

/// Source of the identifier of the currently authenticated user.
///
/// Every saved filter operation fails with `ServiceError::Unauthorized` when
/// no identifier is available, before touching the store.
pub trait SessionSource {
    fn user_id(&self) -> Option<&str>;
}

impl SessionSource for AuthenticatedUser {
    fn user_id(&self) -> Option<&str> {
        Some(self.sub.as_str()).filter(|sub| !sub.is_empty())
    }
}

impl<S: SessionSource> SessionSource for Option<S> {
    fn user_id(&self) -> Option<&str> {
        self.as_ref().and_then(|session| session.user_id())
    }
}

/// Returns the authenticated user's identifier or `ServiceError::Unauthorized`.
pub fn get_user_id<S>(session: &S) -> ServiceResult<&str>
where
    S: SessionSource + ?Sized,
{
    session.user_id().ok_or(ServiceError::Unauthorized)
}

/// Persists a new saved filter and records a `filter_saved` event.
pub fn save_filter<R, A, S>(
    repo: &R,
    analytics: &A,
    session: &S,
    form: SaveFilterForm,
) -> ServiceResult<SavedFilter>
where
    R: SavedFilterWriter + ?Sized,
    A: Analytics + ?Sized,
    S: SessionSource + ?Sized,
{
    let user_id = get_user_id(session)?;

    let (name, filter_data) = form
        .into_parts()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let new_filter = NewSavedFilter::new(user_id, name, filter_data, Utc::now().naive_utc());
    let created = repo
        .create_saved_filter(&new_filter)
        .map_err(ServiceError::from)?;

    analytics.track(AnalyticsEvent::FilterSaved {
        name: created.name.clone(),
        filter_data: created.filter_data.clone(),
    });

    Ok(created)
}

/// Lists the user's saved filters, most recently used first.
///
/// Store failures are logged and yield an empty list.
pub fn get_saved_filters<R, S>(repo: &R, session: &S) -> ServiceResult<Vec<SavedFilter>>
where
    R: SavedFilterReader + ?Sized,
    S: SessionSource + ?Sized,
{
    let user_id = get_user_id(session)?;

    match repo.list_saved_filters(user_id) {
        Ok(filters) => Ok(filters),
        Err(err) => {
            log::error!("Failed to list saved filters for {user_id}: {err}");
            Ok(Vec::new())
        }
    }
}

/// Fetches one of the user's saved filters.
pub fn get_saved_filter_by_id<R, S>(
    repo: &R,
    session: &S,
    id: i32,
) -> ServiceResult<Option<SavedFilter>>
where
    R: SavedFilterReader + ?Sized,
    S: SessionSource + ?Sized,
{
    let user_id = get_user_id(session)?;

    match repo.get_saved_filter_by_id(id, user_id) {
        Ok(saved_filter) => Ok(saved_filter),
        Err(err) => {
            log::error!("Failed to load saved filter {id}: {err}");
            Ok(None)
        }
    }
}

/// Applies a partial update. `updated_at` is refreshed even when nothing else changes.
///
/// Invalid payloads are reported as `ServiceError::Form`; store failures,
/// including a filter owned by someone else, yield `None`.
pub fn update_saved_filter<R, S>(
    repo: &R,
    session: &S,
    id: i32,
    form: EditSavedFilterForm,
) -> ServiceResult<Option<SavedFilter>>
where
    R: SavedFilterWriter + ?Sized,
    S: SessionSource + ?Sized,
{
    let user_id = get_user_id(session)?;

    let updates = form
        .into_update(Utc::now().naive_utc())
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    match repo.update_saved_filter(id, user_id, &updates) {
        Ok(updated) => Ok(Some(updated)),
        Err(err) => {
            log::error!("Failed to update saved filter {id}: {err}");
            Ok(None)
        }
    }
}

/// Deletes one of the user's saved filters, returning whether a row was removed.
pub fn delete_saved_filter<R, S>(repo: &R, session: &S, id: i32) -> ServiceResult<bool>
where
    R: SavedFilterWriter + ?Sized,
    S: SessionSource + ?Sized,
{
    let user_id = get_user_id(session)?;

    match repo.delete_saved_filter(id, user_id) {
        Ok(()) => Ok(true),
        Err(err) => {
            log::error!("Failed to delete saved filter {id}: {err}");
            Ok(false)
        }
    }
}

/// Marks a saved filter as recently used and returns its parameters.
///
/// The read and the timestamp bump are separate statements; concurrent applies
/// of the same filter resolve as last write wins.
pub fn apply_saved_filter<R, A, S>(
    repo: &R,
    analytics: &A,
    session: &S,
    id: i32,
) -> ServiceResult<Option<FilterParams>>
where
    R: SavedFilterReader + SavedFilterWriter + ?Sized,
    A: Analytics + ?Sized,
    S: SessionSource + ?Sized,
{
    let user_id = get_user_id(session)?;

    let saved_filter = match repo.get_saved_filter_by_id(id, user_id) {
        Ok(Some(saved_filter)) => saved_filter,
        Ok(None) => {
            log::warn!("Saved filter {id} not found for {user_id}");
            return Ok(None);
        }
        Err(err) => {
            log::error!("Failed to load saved filter {id}: {err}");
            return Ok(None);
        }
    };

    analytics.track(AnalyticsEvent::SavedFilterApplied {
        filter_id: saved_filter.id,
        name: saved_filter.name.clone(),
    });

    let touch = UpdateSavedFilter::touch(Utc::now().naive_utc());
    if let Err(err) = repo.update_saved_filter(saved_filter.id, user_id, &touch) {
        log::error!("Failed to mark saved filter {id} as used: {err}");
        return Ok(None);
    }

    Ok(Some(saved_filter.filter_data))
}
