use serde::{Deserialize, Serialize};

use crate::domain::filter::{
    FilterParams, FilterState, filter_params_to_state, filter_state_to_params,
};
use crate::services::{ServiceError, ServiceResult};

/// A listings filter in all three shapes the UI works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFilter {
    /// Compact parameters with default values removed.
    pub params: FilterParams,
    /// Fully populated state for the filter panels.
    pub state: FilterState,
    /// Canonical query string (without `?`) for the listings URL.
    pub query: String,
    /// Number of constraint groups currently narrowing the listing.
    pub active_filters: usize,
}

impl NormalizedFilter {
    /// Normalize parameters: expand to state, then collapse back to canonical params.
    pub fn from_params(params: &FilterParams) -> ServiceResult<Self> {
        let state = filter_params_to_state(params);
        let params = filter_state_to_params(&state);
        let query = params
            .to_query()
            .map_err(|err| ServiceError::Form(err.to_string()))?;
        let active_filters = state.active_filter_count();

        Ok(Self {
            params,
            state,
            query,
            active_filters,
        })
    }
}

/// Parses a listings query string and returns its canonical form.
pub fn normalize_filter_query(query: &str) -> ServiceResult<NormalizedFilter> {
    let params =
        FilterParams::from_query(query).map_err(|err| ServiceError::Form(err.to_string()))?;

    NormalizedFilter::from_params(&params)
}
