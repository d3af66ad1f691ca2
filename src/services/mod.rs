pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod filters;
pub mod saved_filters;
