pub mod saved_filters;
