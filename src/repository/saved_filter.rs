use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::saved_filter::{NewSavedFilter, SavedFilter, UpdateSavedFilter},
    models::saved_filter::{
        NewSavedFilter as DbNewSavedFilter, SavedFilter as DbSavedFilter,
        UpdateSavedFilter as DbUpdateSavedFilter,
    },
    repository::{DieselRepository, SavedFilterReader, SavedFilterWriter},
};

impl SavedFilterReader for DieselRepository {
    fn get_saved_filter_by_id(
        &self,
        id: i32,
        user_id: &str,
    ) -> RepositoryResult<Option<SavedFilter>> {
        use crate::schema::saved_filters;

        let mut conn = self.conn()?;
        let saved_filter = saved_filters::table
            .filter(saved_filters::id.eq(id))
            .filter(saved_filters::user_id.eq(user_id))
            .first::<DbSavedFilter>(&mut conn)
            .optional()?;

        Ok(saved_filter.map(Into::into))
    }

    fn list_saved_filters(&self, user_id: &str) -> RepositoryResult<Vec<SavedFilter>> {
        use crate::schema::saved_filters;

        let mut conn = self.conn()?;
        let db_filters = saved_filters::table
            .filter(saved_filters::user_id.eq(user_id))
            .order((saved_filters::updated_at.desc(), saved_filters::id.desc()))
            .load::<DbSavedFilter>(&mut conn)?;

        Ok(db_filters.into_iter().map(Into::into).collect())
    }
}

impl SavedFilterWriter for DieselRepository {
    fn create_saved_filter(&self, new_filter: &NewSavedFilter) -> RepositoryResult<SavedFilter> {
        use crate::schema::saved_filters;

        let mut conn = self.conn()?;
        let insertable = DbNewSavedFilter::from(new_filter);

        let created = diesel::insert_into(saved_filters::table)
            .values(&insertable)
            .get_result::<DbSavedFilter>(&mut conn)?;

        Ok(created.into())
    }

    fn update_saved_filter(
        &self,
        id: i32,
        user_id: &str,
        updates: &UpdateSavedFilter,
    ) -> RepositoryResult<SavedFilter> {
        use crate::schema::saved_filters;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateSavedFilter::from(updates);

        let target = saved_filters::table
            .filter(saved_filters::id.eq(id))
            .filter(saved_filters::user_id.eq(user_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbSavedFilter>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_saved_filter(&self, id: i32, user_id: &str) -> RepositoryResult<()> {
        use crate::schema::saved_filters;

        let mut conn = self.conn()?;
        let target = saved_filters::table
            .filter(saved_filters::id.eq(id))
            .filter(saved_filters::user_id.eq(user_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
