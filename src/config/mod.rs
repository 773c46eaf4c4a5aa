//! Configuration module for Folio-Crawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and the built-in extraction profiles.
//!
//! # Example
//!
//! ```no_run
//! use folio_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawl starts at: {}", config.crawler.start_url);
//! ```

mod parser;
pub mod profiles;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ExtractionConfig, ExtractionTable, OutputConfig, UserAgentConfig,
};

pub use crate::record::ContentMode;

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, parse_config_file, parse_config_str, parse_config_with_hash,
};
pub use profiles::{profile, PROFILE_NAMES};
pub use validation::validate;
