//! Blocking `ureq` client driven from the async runtime

use std::fmt::Display;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{AchievementApi, ApiError};
use crate::domain::{Achievement, AchievementId, ApiKey, Category, CategoryId, Group, GroupId, PlayerAchievement};

/// Public Guild Wars 2 API v2 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.guildwars2.com/v2";

/// The API rejects `ids=` lists longer than this
pub const MAX_IDS_PER_REQUEST: usize = 200;

/// HTTP implementation of [`AchievementApi`]
#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
    max_ids_per_request: usize,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration, max_ids_per_request: usize) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(timeout)
            .user_agent(concat!("achtrack/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
            max_ids_per_request: max_ids_per_request.max(1),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One GET, body decoded as `T`
    pub async fn fetch<T>(&self, url: String) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || fetch_blocking(&agent, &url))
            .await
            .map_err(|e| ApiError::Task(e.to_string()))?
    }

    /// GET `path?ids=...`, split into chunks the API accepts
    async fn fetch_by_ids<I, T>(&self, path: &str, ids: &[I]) -> Result<Vec<T>, ApiError>
    where
        I: Display + Sync,
        T: DeserializeOwned + Send + 'static,
    {
        let mut out = Vec::with_capacity(ids.len());
        for url in batch_urls(&self.base_url, path, ids, self.max_ids_per_request) {
            let mut part: Vec<T> = self.fetch(url).await?;
            out.append(&mut part);
        }
        Ok(out)
    }
}

#[async_trait]
impl AchievementApi for HttpApi {
    async fn group_ids(&self) -> Result<Vec<GroupId>, ApiError> {
        self.fetch(format!("{}/achievements/groups", self.base_url)).await
    }

    async fn groups(&self, ids: &[GroupId]) -> Result<Vec<Group>, ApiError> {
        self.fetch_by_ids("/achievements/groups", ids).await
    }

    async fn categories(&self, ids: &[CategoryId]) -> Result<Vec<Category>, ApiError> {
        self.fetch_by_ids("/achievements/categories", ids).await
    }

    async fn achievements(&self, ids: &[AchievementId]) -> Result<Vec<Achievement>, ApiError> {
        self.fetch_by_ids("/achievements", ids).await
    }

    async fn account_achievements(&self, key: &ApiKey) -> Result<Vec<PlayerAchievement>, ApiError> {
        self.fetch(format!(
            "{}/account/achievements?access_token={}",
            self.base_url,
            key.as_str()
        ))
        .await
    }
}

fn fetch_blocking<T: DeserializeOwned>(agent: &ureq::Agent, url: &str) -> Result<T, ApiError> {
    tracing::debug!("GET {}", redact_token(url));

    let response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => ApiError::Status {
            url: redact_token(url),
            code,
        },
        ureq::Error::Transport(t) => ApiError::Transport {
            url: redact_token(url),
            message: t.to_string(),
        },
    })?;

    let body = response.into_string().map_err(|e| ApiError::Transport {
        url: redact_token(url),
        message: format!("Failed to read response: {}", e),
    })?;

    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        url: redact_token(url),
        message: e.to_string(),
    })
}

/// One `?ids=` URL per chunk of at most `max` ids, in input order
fn batch_urls<I: Display>(base_url: &str, path: &str, ids: &[I], max: usize) -> Vec<String> {
    ids.chunks(max.max(1))
        .map(|chunk| format!("{}{}?ids={}", base_url, path, join_ids(chunk)))
        .collect()
}

fn join_ids<I: Display>(ids: &[I]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Replace the `access_token` query value so URLs are safe to log
pub fn redact_token(url: &str) -> String {
    const PARAM: &str = "access_token=";
    let Some(start) = url.find(PARAM) else {
        return url.to_string();
    };
    let value_start = start + PARAM.len();
    let value_end = url[value_start..]
        .find('&')
        .map(|i| value_start + i)
        .unwrap_or(url.len());
    format!("{}***{}", &url[..value_start], &url[value_end..])
}
