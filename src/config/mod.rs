//! Configuration module for Longrun
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! The configuration is immutable once loaded and is handed to the report
//! driver at construction time.
//!
//! # Example
//!
//! ```no_run
//! use longrun::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("longrun.toml")).unwrap();
//! println!("Threshold: {}s", config.search.threshold_seconds());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, SearchConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config_file, parse_config_str};
pub use validation::validate;
