use crate::config::types::{
    CatalogConfig, Config, HttpConfig, MarkerConfig, RetryConfig, SelectorConfig,
};
use crate::ConfigError;
use url::Url;

/// Inclusive bounds for the retry delay (seconds)
pub const DELAY_RANGE: (f64, f64) = (0.1, 5.0);

/// Inclusive upper bound for the retry budget
pub const MAX_RETRY_BUDGET: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.name.trim().is_empty() {
        return Err(ConfigError::Validation("name cannot be empty".to_string()));
    }

    validate_catalog_config(&config.catalog)?;
    validate_selector_config(&config.selectors)?;
    validate_marker_config(&config.markers)?;
    validate_retry_config(&config.retry)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let seed = parse_http_url("seed-url", &config.seed_url)?;
    parse_http_url("base-url", &config.base_url)?;

    if config.page_param.is_empty() {
        return Err(ConfigError::Validation(
            "page-param cannot be empty".to_string(),
        ));
    }

    let page = seed
        .query_pairs()
        .find(|(key, _)| key == config.page_param.as_str())
        .map(|(_, value)| value.into_owned());

    match page {
        Some(value) if value.parse::<u32>().is_ok() => {}
        Some(value) => {
            return Err(ConfigError::Validation(format!(
                "seed-url parameter '{}' must be numeric, got '{}'",
                config.page_param, value
            )));
        }
        None => {
            return Err(ConfigError::Validation(format!(
                "seed-url must carry a '{}' query parameter",
                config.page_param
            )));
        }
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates that no selector is blank
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    let selectors = [
        ("catalog-entry", &config.catalog_entry),
        ("detail-link", &config.detail_link),
        ("location", &config.location),
        ("price", &config.price),
        ("feature-label", &config.feature_label),
        ("feature-value", &config.feature_value),
    ];

    for (name, value) in selectors {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "selector '{}' cannot be empty",
                name
            )));
        }
    }

    Ok(())
}

fn validate_marker_config(config: &MarkerConfig) -> Result<(), ConfigError> {
    let markers = [
        ("currency", &config.currency),
        ("street", &config.street),
        ("city", &config.city),
        ("source-locale", &config.source_locale),
        ("canonical-locale", &config.canonical_locale),
    ];

    for (name, value) in markers {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!(
                "marker '{}' cannot be empty",
                name
            )));
        }
    }

    Ok(())
}

fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    validate_retry_bounds(config.delay_secs, config.max_retries)
}

/// Checks a delay/budget pair against the accepted ranges
///
/// [`crate::crawler::RetryPolicy::new`] applies the same bounds to policies
/// built in code.
pub fn validate_retry_bounds(delay_secs: f64, max_retries: u32) -> Result<(), ConfigError> {
    let (min_delay, max_delay) = DELAY_RANGE;
    if !(min_delay..=max_delay).contains(&delay_secs) {
        return Err(ConfigError::Validation(format!(
            "retry delay must be between {} and {} seconds, got {}",
            min_delay, max_delay, delay_secs
        )));
    }

    if max_retries > MAX_RETRY_BUDGET {
        return Err(ConfigError::Validation(format!(
            "max-retries must be between 0 and {}, got {}",
            MAX_RETRY_BUDGET, max_retries
        )));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Parses a URL and requires an HTTP(S) scheme
fn parse_http_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            field, raw
        )));
    }

    Ok(url)
}
