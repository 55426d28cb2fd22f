use std::fs;
use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::types::{Result, SeriesSpec};

/// BLS rejects requests without a browser-like user agent
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Headers sent with every download
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers
}

/// Blocking HTTP client used for all downloads
pub fn build_client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Outcome of a failed attempt
#[derive(Debug)]
pub enum AttemptError {
    /// Worth retrying
    Transient(Error),
    /// Give up immediately
    Fatal(Error),
}

/// Bounded retry with multiplicative backoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub backoff_factor: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(5),
            backoff_factor: 5,
        }
    }
}

impl RetryPolicy {
    /// Delay before each retry (one fewer than the number of attempts)
    pub fn delays(&self) -> Vec<Duration> {
        let mut delays = Vec::new();
        let mut delay = self.initial_delay;
        for _ in 1..self.max_attempts {
            delays.push(delay);
            delay *= self.backoff_factor;
        }
        delays
    }

    /// Run `operation` until it succeeds, fails fatally, or attempts run out.
    /// The operation receives the 1-based attempt number.
    pub fn run<T, F>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> std::result::Result<T, AttemptError>,
    {
        let mut delays = self.delays().into_iter();
        let mut attempt = 1;
        loop {
            match operation(attempt) {
                Ok(value) => return Ok(value),
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Transient(e)) => match delays.next() {
                    Some(delay) => {
                        warn!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "Retrying");
                        sleep(delay);
                        attempt += 1;
                    }
                    None => {
                        error!(attempt, error = %e, "Exhausted retries");
                        return Err(e);
                    }
                },
            }
        }
    }
}

/// Download `url` as text. Transport errors, 5xx and 429 are retried under
/// `policy`; any other non-success status or an empty body is fatal.
pub fn fetch(client: &Client, url: &str, headers: &HeaderMap, policy: &RetryPolicy) -> Result<String> {
    let unavailable = |reason: String| Error::UpstreamUnavailable {
        url: url.to_string(),
        reason,
    };

    policy.run(|attempt| {
        debug!(%url, attempt, "GET");
        let response = client
            .get(url)
            .headers(headers.clone())
            .send()
            .map_err(|e| AttemptError::Transient(unavailable(e.to_string())))?;

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AttemptError::Transient(unavailable(format!("HTTP status {}", status))));
        }
        if !status.is_success() {
            return Err(AttemptError::Fatal(unavailable(format!("HTTP status {}", status))));
        }

        let body = response
            .text()
            .map_err(|e| AttemptError::Transient(unavailable(e.to_string())))?;
        if body.is_empty() {
            return Err(AttemptError::Fatal(unavailable("empty response body".to_string())));
        }
        Ok(body)
    })
}

/// Supplies the raw text of a series
pub trait SeriesSource {
    fn load(&mut self, series: &SeriesSpec) -> Result<String>;
}

/// Downloads each series and keeps a copy of the raw file in `save_dir`
pub struct HttpSource {
    client: Client,
    headers: HeaderMap,
    policy: RetryPolicy,
    save_dir: PathBuf,
}

impl HttpSource {
    pub fn new(client: Client, policy: RetryPolicy, save_dir: PathBuf) -> Self {
        Self {
            client,
            headers: default_headers(),
            policy,
            save_dir,
        }
    }
}

impl SeriesSource for HttpSource {
    fn load(&mut self, series: &SeriesSpec) -> Result<String> {
        info!(series = %series.name, url = %series.url, "downloading");
        let text = fetch(&self.client, &series.url, &self.headers, &self.policy)?;

        let path = self.save_dir.join(format!("{}.csv", series.name));
        fs::write(&path, &text)?;
        info!(series = %series.name, path = %path.display(), bytes = text.len(), "saved raw file");

        Ok(text)
    }
}

/// Reads raw files saved by an earlier download
pub struct SavedFileSource {
    dir: PathBuf,
}

impl SavedFileSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl SeriesSource for SavedFileSource {
    fn load(&mut self, series: &SeriesSpec) -> Result<String> {
        let path = self.dir.join(format!("{}.csv", series.name));
        info!(series = %series.name, path = %path.display(), "reading saved raw file");
        Ok(fs::read_to_string(path)?)
    }
}
