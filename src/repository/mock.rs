use mockall::mock;

use super::{SavedFilterReader, SavedFilterWriter};
use crate::domain::saved_filter::{NewSavedFilter, SavedFilter, UpdateSavedFilter};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub SavedFilterRepo {}

    impl SavedFilterReader for SavedFilterRepo {
        fn get_saved_filter_by_id(&self, id: i32, user_id: &str) -> RepositoryResult<Option<SavedFilter>>;
        fn list_saved_filters(&self, user_id: &str) -> RepositoryResult<Vec<SavedFilter>>;
    }

    impl SavedFilterWriter for SavedFilterRepo {
        fn create_saved_filter(&self, new_filter: &NewSavedFilter) -> RepositoryResult<SavedFilter>;
        fn update_saved_filter(&self, id: i32, user_id: &str, updates: &UpdateSavedFilter) -> RepositoryResult<SavedFilter>;
        fn delete_saved_filter(&self, id: i32, user_id: &str) -> RepositoryResult<()>;
    }
}
