use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::{stream, StreamExt};
use reqwest::header::ACCEPT;

use crate::normalize::{normalize, NormalizeSettings};
use crate::sniff::{classify, Sniffed, ACCEPT_IMAGE_TYPES};
use crate::types::{FailureKind, FetchError};

/// In-flight cap used when a caller passes `concurrency == 0`.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// HTTP client tuning for image hosts. One client serves all requests of a
/// source, so pooled connections are reused across the batch.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub redirect_limit: usize,
    pub normalize: NormalizeSettings,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            redirect_limit: 10,
            normalize: NormalizeSettings::default(),
        }
    }
}

/// Source of normalized image bytes, injectable for tests.
#[async_trait::async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch one URL and return normalized PNG bytes.
    async fn fetch_one(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Real source: HTTP GET, magic-number sniff, decode/resample/re-encode.
#[derive(Debug)]
pub struct HttpImageSource {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl HttpImageSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .pool_idle_timeout(settings.pool_idle_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Process-wide shared instance, built once on first use.
    pub fn shared() -> &'static HttpImageSource {
        static SHARED: OnceLock<HttpImageSource> = OnceLock::new();
        SHARED.get_or_init(|| {
            HttpImageSource::new(FetchSettings::default()).expect("default http client")
        })
    }
}

#[async_trait::async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch_one(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = url::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, ACCEPT_IMAGE_TYPES)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if classify(&body) == Sniffed::Unsupported {
            return Err(FetchError::new(
                FailureKind::UnsupportedFormat,
                "unrecognized image magic number",
            ));
        }

        normalize(&body, &self.settings.normalize).map_err(FetchError::from)
    }
}

/// Fetch every distinct URL with at most `concurrency` requests in flight.
///
/// Duplicate input URLs collapse to a single request. A URL that fails at any
/// stage is logged and omitted from the result map; the batch itself never
/// fails here — cancellation, if any, is the caller wrapping this future in a
/// timeout and dropping it. `concurrency == 0` selects [`DEFAULT_CONCURRENCY`].
pub async fn fetch_all(
    source: &dyn ImageSource,
    urls: &[String],
    concurrency: usize,
) -> HashMap<String, Vec<u8>> {
    let mut results = HashMap::new();
    if urls.is_empty() {
        return results;
    }
    let unique = dedupe(urls);
    let concurrency = if concurrency == 0 {
        DEFAULT_CONCURRENCY
    } else {
        concurrency
    };

    let mut settled = stream::iter(unique)
        .map(|url| async move {
            let outcome = source.fetch_one(&url).await;
            (url, outcome)
        })
        .buffer_unordered(concurrency);

    while let Some((url, outcome)) = settled.next().await {
        match outcome {
            Ok(bytes) => {
                results.insert(url, bytes);
            }
            Err(err) => {
                engine_debug!("dropping {url}: {err}");
            }
        }
    }
    results
}

fn dedupe(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.iter()
        .filter(|url| seen.insert(url.as_str()))
        .cloned()
        .collect()
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
