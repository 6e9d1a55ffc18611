//! Forkify HTTP client
//!
//! Implements both repositories against the Forkify recipe API:
//! `GET {base}/search?q=<query>` and `GET {base}/get?rId=<id>`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{FetchError, RecipeRepository, SearchRepository};
use crate::storage::settings::AppSettings;

pub struct ForkifyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForkifyClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-assistant/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, FetchError> {
        Self::new(
            settings.api_base_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)], what: &str) -> Result<Value, FetchError> {
        let url = self.endpoint(path);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("{}: {}", url, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!("{} returned HTTP {}", url, status.as_u16())));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("{}: {}", url, e)))
    }
}

/// The API reports unknown IDs and empty searches with an `error` field
fn check_error(body: &Value, what: &str) -> Result<(), FetchError> {
    match body.get("error") {
        Some(err) => {
            tracing::debug!("API error for {}: {}", what, err);
            Err(FetchError::NotFound(what.to_string()))
        }
        None => Ok(()),
    }
}

fn recipe_from_body(id: &str, body: Value) -> Result<Value, FetchError> {
    let what = format!("recipe {}", id);
    check_error(&body, &what)?;
    match body {
        Value::Object(mut obj) => obj
            .remove("recipe")
            .ok_or_else(|| FetchError::InvalidResponse(format!("no 'recipe' in response for {}", what))),
        _ => Err(FetchError::InvalidResponse(format!("unexpected response for {}", what))),
    }
}

fn search_from_body(query: &str, body: Value) -> Result<Value, FetchError> {
    let what = format!("results for '{}'", query);
    check_error(&body, &what)?;
    if body.get("recipes").is_some_and(Value::is_array) {
        Ok(body)
    } else {
        Err(FetchError::InvalidResponse(format!("no 'recipes' in response for {}", what)))
    }
}

#[async_trait]
impl RecipeRepository for ForkifyClient {
    async fn fetch_by_id(&self, id: &str) -> Result<Value, FetchError> {
        let body = self.get_json("get", &[("rId", id)], &format!("recipe {}", id)).await?;
        recipe_from_body(id, body)
    }
}

#[async_trait]
impl SearchRepository for ForkifyClient {
    async fn fetch_by_query(&self, query: &str) -> Result<Value, FetchError> {
        let body = self
            .get_json("search", &[("q", query)], &format!("results for '{}'", query))
            .await?;
        search_from_body(query, body)
    }
}
