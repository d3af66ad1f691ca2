use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::saved_filter::{NewSavedFilter, SavedFilter, UpdateSavedFilter};

pub mod saved_filter;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over saved filters. Every lookup is scoped to the owner.
pub trait SavedFilterReader {
    fn get_saved_filter_by_id(
        &self,
        id: i32,
        user_id: &str,
    ) -> RepositoryResult<Option<SavedFilter>>;
    /// All filters owned by `user_id`, most recently updated first.
    fn list_saved_filters(&self, user_id: &str) -> RepositoryResult<Vec<SavedFilter>>;
}

/// Write operations over saved filters.
///
/// Updates and deletes return `RepositoryError::NotFound` when no row matches
/// both the identifier and the owner.
pub trait SavedFilterWriter {
    fn create_saved_filter(&self, new_filter: &NewSavedFilter) -> RepositoryResult<SavedFilter>;
    fn update_saved_filter(
        &self,
        id: i32,
        user_id: &str,
        updates: &UpdateSavedFilter,
    ) -> RepositoryResult<SavedFilter>;
    fn delete_saved_filter(&self, id: i32, user_id: &str) -> RepositoryResult<()>;
}
