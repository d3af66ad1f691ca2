use chrono::NaiveDateTime;
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;

use crate::domain::filter::FilterParams;
use crate::domain::saved_filter::{
    NewSavedFilter as DomainNewSavedFilter, SavedFilter as DomainSavedFilter,
    UpdateSavedFilter as DomainUpdateSavedFilter,
};

/// Filter payload stored as a JSON document in a text column.
#[derive(Debug, Clone, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub struct FilterDataJson(pub FilterParams);

impl ToSql<Text, Sqlite> for FilterDataJson {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(serde_json::to_string(&self.0)?);
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for FilterDataJson {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Ok(Self(serde_json::from_str(&text)?))
    }
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::saved_filters)]
pub struct SavedFilter {
    pub id: i32,
    pub user_id: String,
    pub name: String,
    pub filter_data: FilterDataJson,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::saved_filters)]
pub struct NewSavedFilter<'a> {
    pub user_id: &'a str,
    pub name: &'a str,
    pub filter_data: FilterDataJson,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::saved_filters)]
pub struct UpdateSavedFilter<'a> {
    pub name: Option<&'a str>,
    pub filter_data: Option<FilterDataJson>,
    pub updated_at: NaiveDateTime,
}

impl From<SavedFilter> for DomainSavedFilter {
    fn from(value: SavedFilter) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            name: value.name,
            filter_data: value.filter_data.0,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewSavedFilter> for NewSavedFilter<'a> {
    fn from(value: &'a DomainNewSavedFilter) -> Self {
        Self {
            user_id: value.user_id.as_str(),
            name: value.name.as_str(),
            filter_data: FilterDataJson(value.filter_data.clone()),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateSavedFilter> for UpdateSavedFilter<'a> {
    fn from(value: &'a DomainUpdateSavedFilter) -> Self {
        Self {
            name: value.name.as_deref(),
            filter_data: value.filter_data.clone().map(FilterDataJson),
            updated_at: value.updated_at,
        }
    }
}
