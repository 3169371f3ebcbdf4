//! Shared HTTP client with a sync facade.
//!
//! Uses async reqwest internally on a shared tokio runtime, but presents
//! blocking calls so the fetch loop stays a plain sequential loop.

use std::sync::{LazyLock, OnceLock};
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiErrorKind};

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Global HTTP settings, applied once before the first request
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

static HTTP_CONFIG: OnceLock<HttpConfig> = OnceLock::new();

/// Set global HTTP settings. Ignored (with a warning) once the client exists.
pub fn set_http_config(config: HttpConfig) {
    if HTTP_CONFIG.set(config).is_err() {
        log::warn!("HTTP config already initialized, ignoring {config:?}");
    }
}

/// Current global HTTP settings
pub fn http_config() -> HttpConfig {
    *HTTP_CONFIG.get_or_init(HttpConfig::default)
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(http_config().timeout)
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Blocking GET with query parameters, decoding a JSON body.
///
/// Non-success responses are turned into a classified [`ApiError`] using
/// the response body; a success body that fails to decode is `Fatal`.
pub fn get_json<T: DeserializeOwned>(url: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
    let body = SHARED_RUNTIME.handle().block_on(async {
        let resp = http_client()
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = resp.status();
        let text = resp.text().await.map_err(ApiError::from_reqwest)?;
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &text));
        }
        Ok::<_, ApiError>(text)
    })?;

    serde_json::from_str(&body)
        .map_err(|e| ApiError::new(ApiErrorKind::Fatal, format!("invalid JSON response: {e}")))
}
