use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::catalog::{BookFileRecord, Catalog};

/// Where the flat record list comes from: a hosted JSON document or a file
/// on disk.
#[derive(Clone, Debug)]
pub enum CatalogSource {
    Url(String),
    FilePath(String),
}

#[derive(Clone, Debug)]
pub struct Options {
    pub url: Option<String>,
    pub input_file: Option<String>,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: None,
            input_file: None,
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("no catalog source provided (url and input_file are both empty)")]
    NoSource,

    #[error("use either url or input_file, not both")]
    ConflictingSources,

    #[error("invalid timeout {value}, expected positive integer")]
    InvalidTimeout { value: usize },

    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch catalog: {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("catalog request failed: {url}: status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("failed to read catalog file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of one fetch-and-group pass.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub started_at: Instant,
    pub elapsed: Duration,
    pub source: CatalogSource,
    pub records_total: usize,
    pub catalog: Catalog,
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
    source: CatalogSource,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        let source = match (options.url.as_deref(), options.input_file.as_deref()) {
            (Some(_), Some(_)) => return Err(RunnerError::ConflictingSources),
            (Some(url), None) => {
                if reqwest::Url::parse(url).is_err() {
                    return Err(RunnerError::InvalidUrl {
                        url: url.to_string(),
                    });
                }
                CatalogSource::Url(url.to_string())
            }
            (None, Some(path)) => CatalogSource::FilePath(path.to_string()),
            (None, None) => return Err(RunnerError::NoSource),
        };
        if options.timeout_seconds == 0 {
            return Err(RunnerError::InvalidTimeout {
                value: options.timeout_seconds,
            });
        }
        Ok(Self { options, source })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Loads the record list from the configured source, parses it, and
    /// groups it by title. One attempt, no retry; any failure along the way
    /// surfaces as a single error and nothing is rendered.
    pub async fn run(&self) -> Result<RunOutcome, RunnerError> {
        let started_at = Instant::now();
        let body = match &self.source {
            CatalogSource::Url(url) => self.fetch_remote(url).await?,
            CatalogSource::FilePath(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| RunnerError::FileRead {
                        path: path.clone(),
                        source,
                    })?
            }
        };

        let records: Vec<BookFileRecord> =
            serde_json::from_str(&body).map_err(|source| RunnerError::InvalidJson { source })?;
        let catalog = Catalog::group(&records);

        Ok(RunOutcome {
            started_at,
            elapsed: started_at.elapsed(),
            source: self.source.clone(),
            records_total: records.len(),
            catalog,
        })
    }

    async fn fetch_remote(&self, url: &str) -> Result<String, RunnerError> {
        let timeout = self.options.timeout_seconds.try_into().unwrap_or(10);
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(timeout));
        if let Some(proxy_url) = self.options.proxy.as_deref() {
            let proxy =
                reqwest::Proxy::all(proxy_url).map_err(|source| RunnerError::ProxySetup {
                    proxy: proxy_url.to_string(),
                    source,
                })?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|source| RunnerError::HttpClientBuild { source })?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|source| RunnerError::Fetch {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(RunnerError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|source| RunnerError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}
