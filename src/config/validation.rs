use crate::config::types::{Config, CrawlerConfig, ExtractionConfig, OutputConfig};
use crate::crawler::compile_selector;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_extraction_config(&config.extraction)?;
    Ok(())
}

/// Validates traversal configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_start_url(&config.start_url)?;

    if config.max_items == Some(0) {
        return Err(ConfigError::Validation(
            "max_items must be >= 1 when set".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.max_concurrent_items < 1 || config.max_concurrent_items > 32 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_items must be between 1 and 32, got {}",
            config.max_concurrent_items
        )));
    }

    Ok(())
}

/// Validates the start URL: non-empty, parseable, http or https
fn validate_start_url(start_url: &str) -> Result<(), ConfigError> {
    if start_url.is_empty() {
        return Err(ConfigError::Validation(
            "start_url cannot be empty".to_string(),
        ));
    }

    let url = Url::parse(start_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid start_url '{}': {}", start_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "start_url '{}' must use http or https",
            start_url
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    if config.effective_format().is_none() {
        return Err(ConfigError::Validation(format!(
            "cannot infer output format from '{}', set it explicitly",
            config.path
        )));
    }

    validate_table_name(&config.table_name)?;

    Ok(())
}

/// Table names are interpolated into SQL, so only plain identifiers pass
fn validate_table_name(name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if !valid {
        return Err(ConfigError::Validation(format!(
            "table_name must be a plain SQL identifier, got '{}'",
            name
        )));
    }

    Ok(())
}

/// Validates selectors and field mapping
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    for selector in [
        &config.item_links,
        &config.next_page,
        &config.title,
        &config.content,
    ] {
        compile_selector(selector)?;
    }

    if config.content_count < 1 {
        return Err(ConfigError::Validation(
            "content_count must be >= 1".to_string(),
        ));
    }

    for (name, value) in [
        ("next_page_text", &config.next_page_text),
        ("item_link_filter", &config.item_link_filter),
        ("title_url_suffix", &config.title_url_suffix),
    ] {
        if value.as_deref().is_some_and(|text| text.trim().is_empty()) {
            return Err(ConfigError::Validation(format!("{} cannot be blank", name)));
        }
    }

    Ok(())
}
