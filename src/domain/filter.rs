use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sort field applied when none is requested.
pub const DEFAULT_SORT_BY: &str = "createdAt";
/// Lower edge of the price slider.
pub const DEFAULT_PRICE_MIN: u32 = 0;
/// Upper edge of the price slider.
pub const DEFAULT_PRICE_MAX: u32 = 10_000;
/// First page of listings (1-based).
pub const DEFAULT_PAGE: u32 = 1;
/// Number of listings shown per page.
pub const DEFAULT_LIMIT: u32 = 20;

/// Direction applied to the sort field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Compact wire representation of a listings filter.
///
/// Every field is optional; fields equal to their default are left out when
/// the filter is serialized, both as JSON and as a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterParams {
    /// Free-text search over listing titles and descriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Listing categories (dress, suit, veil, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Item conditions (new, like-new, used, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<String>>,
    /// Lower price bound in whole currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<u32>,
    /// Upper price bound in whole currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<u32>,
    /// Style tags (boho, vintage, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<String>>,
    /// Color tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Requested page (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Name of the listing field to sort by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Inclusive price bounds shown by the price slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_PRICE_MIN,
            max: DEFAULT_PRICE_MAX,
        }
    }
}

/// Normalized filter state consumed by the filter panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search: String,
    pub categories: Vec<String>,
    pub conditions: Vec<String>,
    pub price_range: PriceRange,
    pub styles: Vec<String>,
    pub colors: Vec<String>,
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for FilterState {
    fn default() -> Self {
        default_filter_state()
    }
}

impl FilterState {
    /// Number of constraint groups that narrow the listing.
    ///
    /// The price range counts once no matter which bound moved. Sorting and
    /// pagination are not constraints.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search.is_empty(),
            !self.categories.is_empty(),
            !self.conditions.is_empty(),
            self.price_range != PriceRange::default(),
            !self.styles.is_empty(),
            !self.colors.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// The canonical empty filter.
pub fn default_filter_state() -> FilterState {
    FilterState {
        search: String::new(),
        categories: Vec::new(),
        conditions: Vec::new(),
        price_range: PriceRange::default(),
        styles: Vec::new(),
        colors: Vec::new(),
        page: DEFAULT_PAGE,
        limit: DEFAULT_LIMIT,
        sort_by: DEFAULT_SORT_BY.to_string(),
        sort_order: SortOrder::default(),
    }
}

/// Expand wire parameters into a fully populated state.
pub fn filter_params_to_state(params: &FilterParams) -> FilterState {
    FilterState {
        search: params.search.clone().unwrap_or_default(),
        categories: params.categories.clone().unwrap_or_default(),
        conditions: params.conditions.clone().unwrap_or_default(),
        price_range: PriceRange {
            min: params.price_min.unwrap_or(DEFAULT_PRICE_MIN),
            max: params.price_max.unwrap_or(DEFAULT_PRICE_MAX),
        },
        styles: params.styles.clone().unwrap_or_default(),
        colors: params.colors.clone().unwrap_or_default(),
        page: params.page.unwrap_or(DEFAULT_PAGE),
        limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        sort_by: params
            .sort_by
            .clone()
            .unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
        sort_order: params.sort_order.unwrap_or_default(),
    }
}

/// Collapse a state back into wire parameters, omitting default values.
pub fn filter_state_to_params(state: &FilterState) -> FilterParams {
    FilterParams {
        search: non_empty_string(&state.search),
        categories: non_empty_list(&state.categories),
        conditions: non_empty_list(&state.conditions),
        price_min: non_default(state.price_range.min, DEFAULT_PRICE_MIN),
        price_max: non_default(state.price_range.max, DEFAULT_PRICE_MAX),
        styles: non_empty_list(&state.styles),
        colors: non_empty_list(&state.colors),
        page: non_default(state.page, DEFAULT_PAGE),
        limit: non_default(state.limit, DEFAULT_LIMIT),
        sort_by: (state.sort_by != DEFAULT_SORT_BY).then(|| state.sort_by.clone()),
        sort_order: non_default(state.sort_order, SortOrder::default()),
    }
}

fn non_empty_string(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn non_empty_list(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

fn non_default<T: PartialEq>(value: T, default: T) -> Option<T> {
    (value != default).then_some(value)
}

/// Errors raised while decoding filter parameters from a query string.
#[derive(Debug, Error)]
pub enum FilterQueryError {
    #[error("invalid filter query: {0}")]
    Decode(#[from] serde_html_form::de::Error),
    #[error("failed to encode filter query: {0}")]
    Encode(#[from] serde_html_form::ser::Error),
}

impl FilterParams {
    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Decode parameters from a listings query string.
    ///
    /// Tag lists use repeated keys: `categories=dress&categories=veil`.
    pub fn from_query(query: &str) -> Result<Self, FilterQueryError> {
        Ok(serde_html_form::from_str(query.trim_start_matches('?'))?)
    }

    /// Encode the parameters as a query string without a leading `?`.
    pub fn to_query(&self) -> Result<String, FilterQueryError> {
        Ok(serde_html_form::to_string(self)?)
    }
}
