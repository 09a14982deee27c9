//! Where the deal dataset comes from.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use super::error::DatasetError;
use super::raw::DealSet;

/// Request timeout for remote datasets.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Location of the dataset document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealSource {
    /// A JSON file on disk
    File(PathBuf),
    /// A JSON document served over HTTP(S)
    Url(String),
}

impl DealSource {
    /// Interpret `s` as a URL if it has an HTTP(S) scheme, else as a path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DealSource::Url(s.to_string())
        } else {
            DealSource::File(PathBuf::from(s))
        }
    }

    /// Read and parse the dataset document.
    pub async fn fetch(&self) -> Result<DealSet, DatasetError> {
        let body = match self {
            DealSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| DatasetError::Io {
                        path: path.display().to_string(),
                        source,
                    })?
            }
            DealSource::Url(url) => fetch_url(url).await?,
        };

        debug!(source = %self, bytes = body.len(), "Fetched deal dataset");

        DealSet::from_json(&body)
    }
}

async fn fetch_url(url: &str) -> Result<String, DatasetError> {
    let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;

    let response = http.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DatasetError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}

impl fmt::Display for DealSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealSource::File(path) => write!(f, "{}", path.display()),
            DealSource::Url(url) => f.write_str(url),
        }
    }
}
