//! Configuration module
//!
//! Settings for the API endpoint and the results display, backed by a
//! TOML file in the user's config directory.

pub mod config;
