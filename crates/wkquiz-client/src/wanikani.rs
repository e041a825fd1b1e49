//! WaniKani v2 API client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use wkquiz_core::error::{ApiError, ErrorEnvelope};
use wkquiz_core::filter::SubjectFilter;
use wkquiz_core::model::{ReviewStatistic, Subject, UserInfo};
use wkquiz_core::traits::StudyApi;

use crate::config::QuizConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.wanikani.com/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const API_REVISION: &str = "20170710";

/// Which endpoint proves a subject has been reviewed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    #[default]
    ReviewStatistics,
    Reviews,
}

impl ReviewSource {
    fn path(self) -> &'static str {
        match self {
            ReviewSource::ReviewStatistics => "review_statistics",
            ReviewSource::Reviews => "reviews",
        }
    }
}

/// The result of following a list endpoint to its end.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Every `data` item from every page, in order.
    Collection(Vec<Value>),
    /// The first response had no pagination envelope; this is its body.
    Resource(Value),
}

#[derive(Deserialize)]
struct Page {
    data: Vec<Value>,
    pages: Pages,
}

#[derive(Deserialize)]
struct Pages {
    #[serde(default)]
    next_url: Option<String>,
}

#[derive(Deserialize)]
struct UserResource {
    data: UserInfo,
}

/// WaniKani API client.
pub struct WaniKaniClient {
    api_token: String,
    base_url: String,
    review_source: ReviewSource,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl WaniKaniClient {
    pub fn new(api_token: &str, base_url: Option<String>) -> anyhow::Result<Self> {
        Self::build(
            api_token,
            base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            DEFAULT_TIMEOUT_SECS,
        )
    }

    pub fn from_config(config: &QuizConfig) -> anyhow::Result<Self> {
        let client = Self::build(
            config.require_token()?,
            config.base_url.clone(),
            config.timeout_secs,
        )?;
        Ok(client.with_review_source(config.review_source))
    }

    fn build(api_token: &str, base_url: String, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            api_token: api_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            review_source: ReviewSource::default(),
            timeout_secs,
            client,
        })
    }

    pub fn with_review_source(mut self, review_source: ReviewSource) -> Self {
        self.review_source = review_source;
        self
    }

    /// Follow `pages.next_url` from `url` until it is null.
    ///
    /// A first response without a pagination envelope is returned as-is
    /// in [`Fetched::Resource`]. Errors are not retried.
    #[instrument(skip(self))]
    pub async fn fetch_all_pages(&self, url: &str) -> Result<Fetched, ApiError> {
        let mut items = Vec::new();
        let mut next = Some(url.to_string());
        let mut page_count = 0u32;

        while let Some(url) = next.take() {
            let body = self.get_json(&url).await?;
            let page = match serde_json::from_value::<Page>(body.clone()) {
                Ok(page) => page,
                Err(_) if page_count == 0 => return Ok(Fetched::Resource(body)),
                Err(_) => return Err(ApiError::from_unexpected(&body, "a collection page")),
            };
            page_count += 1;
            tracing::debug!(page = page_count, items = page.data.len(), "fetched page");
            items.extend(page.data);
            next = page.pages.next_url;
        }

        Ok(Fetched::Collection(items))
    }

    /// One authenticated GET, decoded as JSON.
    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .header("Wanikani-Revision", API_REVISION)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout(self.timeout_secs)
                } else {
                    ApiError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Api {
                    code: status.as_u16(),
                    message: text,
                })
            }
            Err(e) => return Err(ApiError::Decode(format!("HTTP {status}: {e}"))),
        };

        if !status.is_success() && ErrorEnvelope::from_value(&body).is_none() {
            return Err(ApiError::Api {
                code: status.as_u16(),
                message: text,
            });
        }
        Ok(body)
    }

    async fn collection<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<Vec<T>, ApiError> {
        match self.fetch_all_pages(url).await? {
            Fetched::Collection(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<T>, _>>()
                .map_err(|e| ApiError::Decode(format!("{what}: {e}"))),
            Fetched::Resource(body) => Err(ApiError::from_unexpected(&body, what)),
        }
    }
}

#[async_trait]
impl StudyApi for WaniKaniClient {
    #[instrument(skip(self))]
    async fn user_info(&self) -> anyhow::Result<UserInfo> {
        let body = self.get_json(&format!("{}/user", self.base_url)).await?;
        if let Some(envelope) = ErrorEnvelope::from_value(&body) {
            return Err(ApiError::from(envelope).into());
        }
        let user: UserResource =
            serde_json::from_value(body).map_err(|e| ApiError::Decode(format!("user: {e}")))?;
        Ok(user.data)
    }

    #[instrument(skip(self, filter), fields(query = %filter.query_string()))]
    async fn subjects(&self, filter: &SubjectFilter) -> anyhow::Result<Vec<Subject>> {
        let url = format!("{}/subjects{}", self.base_url, filter.query_string());
        Ok(self.collection::<Subject>(&url, "a subject collection").await?)
    }

    #[instrument(skip(self))]
    async fn review_statistics(&self) -> anyhow::Result<Vec<ReviewStatistic>> {
        tracing::debug!(source = ?self.review_source, "loading reviews");
        let url = format!("{}/{}", self.base_url, self.review_source.path());
        Ok(self.collection::<ReviewStatistic>(&url, "a review collection").await?)
    }
}
