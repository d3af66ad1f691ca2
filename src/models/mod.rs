pub mod saved_filter;
