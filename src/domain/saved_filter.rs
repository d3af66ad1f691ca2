use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::filter::FilterParams;

/// Domain representation of a named filter owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilter {
    /// Unique identifier assigned by the store.
    pub id: i32,
    /// Opaque identifier of the owning user.
    pub user_id: String,
    /// Display name chosen by the user.
    pub name: String,
    /// Embedded filter payload.
    pub filter_data: FilterParams,
    /// Timestamp for when the filter was saved.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update or application of the filter.
    pub updated_at: NaiveDateTime,
}

/// Payload required to persist a new saved filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSavedFilter {
    /// Opaque identifier of the owning user.
    pub user_id: String,
    /// Display name chosen by the user.
    pub name: String,
    /// Embedded filter payload.
    pub filter_data: FilterParams,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewSavedFilter {
    /// Build a payload with both timestamps set to `now`.
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        filter_data: FilterParams,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            filter_data,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update applied to an existing saved filter.
///
/// `updated_at` is always written, so applying an otherwise empty patch marks
/// the filter as recently used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSavedFilter {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement filter payload.
    pub filter_data: Option<FilterParams>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateSavedFilter {
    /// A patch that only refreshes `updated_at`.
    pub fn touch(updated_at: NaiveDateTime) -> Self {
        Self {
            name: None,
            filter_data: None,
            updated_at,
        }
    }

    /// Replace the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the filter payload.
    pub fn filter_data(mut self, filter_data: FilterParams) -> Self {
        self.filter_data = Some(filter_data);
        self
    }
}
