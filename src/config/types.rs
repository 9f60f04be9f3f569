use serde::Deserialize;

/// Main configuration structure for Kvartal
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Human-readable description of the scraped source
    #[serde(default = "default_name")]
    pub name: String,

    pub catalog: CatalogConfig,

    pub selectors: SelectorConfig,

    #[serde(default)]
    pub markers: MarkerConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Catalog walk configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// First catalog page; must carry the page query parameter
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Site root prepended to relative detail links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Name of the query parameter holding the page number
    #[serde(rename = "page-param", default = "default_page_param")]
    pub page_param: String,

    /// Number of catalog pages to fetch
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Stop before the page cap when a page has no catalog entries
    #[serde(rename = "stop-on-empty-page", default)]
    pub stop_on_empty_page: bool,
}

/// Class selectors for one page family
///
/// `catalog_entry` and `detail_link` are prefix patterns; the rest are
/// matched as exact classes.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// Class prefix of the `<section>` wrapping one listing
    #[serde(rename = "catalog-entry")]
    pub catalog_entry: String,

    /// Class prefix of the `<a>` linking to the detail page
    #[serde(rename = "detail-link")]
    pub detail_link: String,

    /// Class of the `<a>` holding the location text
    pub location: String,

    /// Class of the `<b>` holding the price text
    pub price: String,

    /// Class of the detail-page `<div>` elements holding feature labels
    #[serde(rename = "feature-label")]
    pub feature_label: String,

    /// Class of the detail-page `<div>` elements holding feature values
    #[serde(rename = "feature-value")]
    pub feature_value: String,
}

/// Textual markers used to normalize scraped values
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerConfig {
    /// Currency unit that terminates the price text
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Literal introducing the street in the location text
    #[serde(default = "default_street")]
    pub street: String,

    /// Literal introducing the city in the location text
    #[serde(default = "default_city")]
    pub city: String,

    /// Language-region path segment rewritten in detail links
    #[serde(rename = "source-locale", default = "default_source_locale")]
    pub source_locale: String,

    /// Replacement for `source_locale`
    #[serde(rename = "canonical-locale", default = "default_canonical_locale")]
    pub canonical_locale: String,
}

/// Retry settings for the document fetcher
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Fixed pause between attempts (seconds)
    #[serde(rename = "delay-secs", default = "default_delay_secs")]
    pub delay_secs: f64,

    /// Attempt budget for a single fetch
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON file written by the binary
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            street: default_street(),
            city: default_city(),
            source_locale: default_source_locale(),
            canonical_locale: default_canonical_locale(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_name() -> String {
    "DomRia listings".to_string()
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_currency() -> String {
    "грн".to_string()
}

fn default_street() -> String {
    "вул.".to_string()
}

fn default_city() -> String {
    "м.".to_string()
}

fn default_source_locale() -> String {
    "/ru/".to_string()
}

fn default_canonical_locale() -> String {
    "/uk/".to_string()
}

fn default_delay_secs() -> f64 {
    1.5
}

fn default_max_retries() -> u32 {
    5
}

fn default_user_agent() -> String {
    format!("kvartal/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_path() -> String {
    "listings.json".to_string()
}
