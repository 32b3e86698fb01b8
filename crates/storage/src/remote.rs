//! Read/append access to a hosted PostgREST table of quiz results
//! (`GET /rest/v1/<table>?userId=eq.<id>&order=created_at.desc&limit=1`).

use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clario_core::model::{CategoryScore, QuizResult, QuizResultId, UserId};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::repository::{NewQuizResult, QuizResultRepository, StorageError};

pub const DEFAULT_TABLE: &str = "userQuizData";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteConfigError {
    #[error("remote store url is invalid: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("remote store api key is empty")]
    EmptyApiKey,
}

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: Url,
    pub api_key: String,
    pub table: String,
}

impl RemoteConfig {
    /// # Errors
    ///
    /// Returns `RemoteConfigError` for an unparsable url or a blank key.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, RemoteConfigError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(RemoteConfigError::EmptyApiKey);
        }
        Ok(Self {
            base_url: Url::parse(base_url.trim())?,
            api_key: api_key.to_owned(),
            table: DEFAULT_TABLE.to_owned(),
        })
    }

    /// Reads `CLARIO_REMOTE_URL`, `CLARIO_REMOTE_KEY` and optionally
    /// `CLARIO_REMOTE_TABLE`. Returns `None` when the url is unset.
    ///
    /// # Errors
    ///
    /// Returns `RemoteConfigError` if the variables are set but invalid.
    pub fn from_env() -> Result<Option<Self>, RemoteConfigError> {
        let Ok(base_url) = env::var("CLARIO_REMOTE_URL") else {
            return Ok(None);
        };
        let api_key = env::var("CLARIO_REMOTE_KEY").unwrap_or_default();
        let mut config = Self::new(&base_url, &api_key)?;
        if let Ok(table) = env::var("CLARIO_REMOTE_TABLE") {
            if !table.trim().is_empty() {
                config.table = table.trim().to_owned();
            }
        }
        Ok(Some(config))
    }

    fn table_url(&self) -> Url {
        let path = format!(
            "{}/rest/v1/{}",
            self.base_url.path().trim_end_matches('/'),
            self.table
        );
        let mut url = self.base_url.clone();
        url.set_path(&path);
        url.set_query(None);
        url
    }

    fn latest_url(&self, user_id: UserId) -> Url {
        let mut url = self.table_url();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("userId", &format!("eq.{user_id}"))
            .append_pair("order", "created_at.desc")
            .append_pair("limit", "1");
        url
    }
}

#[derive(Clone)]
pub struct RemoteQuizStore {
    client: Client,
    config: RemoteConfig,
}

impl RemoteQuizStore {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
    }
}

fn connection(e: reqwest::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn check_status(status: StatusCode) -> Result<(), StorageError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::CONFLICT {
        Err(StorageError::Conflict)
    } else {
        Err(StorageError::Remote {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl QuizResultRepository for RemoteQuizStore {
    async fn latest_for_user(&self, user_id: UserId) -> Result<QuizResult, StorageError> {
        let url = self.config.latest_url(user_id);
        tracing::debug!(%user_id, table = %self.config.table, "querying remote quiz store");
        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(connection)?;
        check_status(response.status())?;

        let rows: Vec<RemoteQuizRow> = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        rows.into_iter()
            .next()
            .ok_or(StorageError::NotFound)?
            .into_result()
    }

    async fn append_result(&self, result: &NewQuizResult) -> Result<QuizResultId, StorageError> {
        let validated = result.clone().into_result(QuizResultId::new(0))?;
        let payload = RemoteQuizInsert {
            user_id: validated.user_id(),
            created_at: validated.created_at(),
            scores: validated.scores().to_vec(),
            recommended_stream: validated.recommended_stream().map(str::to_owned),
        };

        let response = self
            .authorized(self.client.post(self.config.table_url()))
            .header("Prefer", "return=representation")
            .json(&[payload])
            .send()
            .await
            .map_err(connection)?;
        check_status(response.status())?;

        let rows: Vec<RemoteQuizRow> = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        rows.first()
            .map(|row| QuizResultId::new(row.id))
            .ok_or_else(|| StorageError::Serialization("insert returned no rows".into()))
    }
}

#[derive(Debug, Deserialize)]
struct RemoteQuizRow {
    id: u64,
    #[serde(rename = "userId")]
    user_id: UserId,
    created_at: DateTime<Utc>,
    #[serde(default)]
    scores: Vec<CategoryScore>,
    #[serde(rename = "recommendedStream", default)]
    recommended_stream: Option<String>,
}

impl RemoteQuizRow {
    fn into_result(self) -> Result<QuizResult, StorageError> {
        QuizResult::from_persisted(
            QuizResultId::new(self.id),
            self.user_id,
            self.created_at,
            self.scores,
            self.recommended_stream,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct RemoteQuizInsert {
    #[serde(rename = "userId")]
    user_id: UserId,
    created_at: DateTime<Utc>,
    scores: Vec<CategoryScore>,
    #[serde(rename = "recommendedStream")]
    recommended_stream: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> RemoteConfig {
        RemoteConfig::new(base, "anon-key").unwrap()
    }

    #[test]
    fn latest_url_filters_orders_and_limits() {
        let user: UserId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
        let url = config("https://example.supabase.co/").latest_url(user);
        assert_eq!(url.path(), "/rest/v1/userQuizData");
        let query = url.query().unwrap();
        assert!(query.contains("userId=eq.67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(query.contains("order=created_at.desc"));
        assert!(query.ends_with("limit=1"));
    }

    #[test]
    fn table_url_keeps_base_path_prefix() {
        let url = config("https://proxy.local/api/").table_url();
        assert_eq!(url.as_str(), "https://proxy.local/api/rest/v1/userQuizData");
    }

    #[test]
    fn config_rejects_blank_key_and_bad_url() {
        assert!(matches!(
            RemoteConfig::new("https://x.supabase.co", "  "),
            Err(RemoteConfigError::EmptyApiKey)
        ));
        assert!(matches!(
            RemoteConfig::new("not a url", "key"),
            Err(RemoteConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn row_decodes_camel_case_columns() {
        let json = r#"[{
            "id": 7,
            "userId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "created_at": "2023-11-14T22:13:20Z",
            "scores": [{"category": "Science", "score": 12}],
            "recommendedStream": "Science",
            "extra": true
        }]"#;
        let rows: Vec<RemoteQuizRow> = serde_json::from_str(json).unwrap();
        let result = rows.into_iter().next().unwrap().into_result().unwrap();
        assert_eq!(result.id(), QuizResultId::new(7));
        assert_eq!(result.recommended_stream(), Some("Science"));
        assert_eq!(result.top_category().unwrap().score, 12);
    }

    #[test]
    fn non_success_status_maps_to_remote_error() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(matches!(check_status(StatusCode::CONFLICT), Err(StorageError::Conflict)));
        assert!(matches!(
            check_status(StatusCode::UNAUTHORIZED),
            Err(StorageError::Remote { status: 401 })
        ));
    }
}
