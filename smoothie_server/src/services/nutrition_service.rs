//! Nutrition lookups against the external fruit API.
//!
//! Single GET per lookup, no retries, no caching, client default timeouts.

use reqwest::{StatusCode, Url};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("invalid nutrition API base URL {0}")]
    InvalidBaseUrl(String),

    #[error("'{0}' is not a fruit name")]
    InvalidName(String),

    #[error("nutrition request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("nutrition response was not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NutritionOutcome {
    /// HTTP 200 with a JSON body.
    Found(serde_json::Value),
    /// Any other status. The body is not rendered.
    Status(StatusCode),
}

#[derive(Clone)]
pub struct NutritionClient {
    http: reqwest::Client,
    base_url: String,
}

impl NutritionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// `<base>/api/fruit/<name>`, the lowercased name percent-encoded as one segment.
    ///
    /// `.` and `..` are refused: the url crate drops them as path segments.
    pub fn endpoint(&self, fruit: &str) -> Result<Url, NutritionError> {
        let invalid = || NutritionError::InvalidBaseUrl(self.base_url.clone());
        let name = fruit.to_lowercase();
        if name == "." || name == ".." {
            return Err(NutritionError::InvalidName(fruit.to_string()));
        }

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["api", "fruit", name.as_str()]);
        Ok(url)
    }

    pub async fn lookup(&self, fruit: &str) -> Result<NutritionOutcome, NutritionError> {
        let url = self.endpoint(fruit)?;

        let result = self.fetch(url).await;
        crate::metrics::nutrition_lookup(match &result {
            Ok(NutritionOutcome::Found(_)) => "found",
            Ok(NutritionOutcome::Status(_)) => "status",
            Err(_) => "error",
        });
        result
    }

    async fn fetch(&self, url: Url) -> Result<NutritionOutcome, NutritionError> {
        tracing::debug!(%url, "Nutrition lookup");
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            tracing::info!(%status, "Nutrition lookup returned no data");
            return Ok(NutritionOutcome::Status(status));
        }

        let body = resp.text().await?;
        let value = serde_json::from_str(&body)?;
        Ok(NutritionOutcome::Found(value))
    }
}
