pub mod filter;
pub mod saved_filter;
