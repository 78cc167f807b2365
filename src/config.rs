//! Configuration options for the calorie tracker client

use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Default number of daily progress entries per dashboard page
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Default number of meals fetched for one day
pub const DEFAULT_MEALS_PAGE_SIZE: u32 = 50;

/// Configuration options for the client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Page size used by the dashboard list
    pub page_size: u32,

    /// Page size used when listing the meals of one day
    pub meals_page_size: u32,

    /// Value of the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            page_size: DEFAULT_PAGE_SIZE,
            meals_page_size: DEFAULT_MEALS_PAGE_SIZE,
            client_info: format!("calorie-tracker-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the dashboard page size
    pub fn with_page_size(mut self, value: u32) -> Self {
        self.page_size = value.max(1);
        self
    }

    /// Set the page size for a day's meal list
    pub fn with_meals_page_size(mut self, value: u32) -> Self {
        self.meals_page_size = value.max(1);
        self
    }

    /// Set the `X-Client-Info` header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}

/// Where the API lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub options: ClientOptions,
}

impl ClientConfig {
    /// Creates a new configuration, validating the URL.
    pub fn new(url_str: &str) -> Result<Self> {
        let base_url = Url::parse(url_str)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("{} cannot be used as a base URL", url_str)));
        }
        Ok(Self {
            base_url,
            options: ClientOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Reads `CALORIE_API_URL` and the optional `CALORIE_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let url_str = std::env::var("CALORIE_API_URL")
            .map_err(|_| Error::config("CALORIE_API_URL environment variable not found"))?;
        let mut config = Self::new(&url_str)?;

        if let Ok(raw) = std::env::var("CALORIE_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                Error::config(format!("CALORIE_REQUEST_TIMEOUT_SECS must be a number, got {}", raw))
            })?;
            config.options = config
                .options
                .with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(config)
    }

    /// Join an API path (e.g. `/api/v1/meals`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }
}
