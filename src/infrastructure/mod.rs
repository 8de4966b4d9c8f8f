//! Infrastructure layer for filesystem and environment interactions.
//!
//! Currently only config file discovery; see [`paths`].

pub mod paths;

pub use paths::{config_file_path, get_config_dir, resolve_config_path, CONFIG_ENV};
