//! Askbot core — configuration, credentials, chat wire types, utilities.

pub mod config;
pub mod types;
pub mod utils;
