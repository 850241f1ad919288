pub mod autocomplete;
pub mod check_key;
