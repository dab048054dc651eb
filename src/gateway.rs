//! Remote gateway for the Todo Manager HTTP API
//!
//! The gateway is a stateless translator between user intent and HTTP calls:
//! every operation is a single round trip against a fixed base endpoint, with
//! no retries and no caching. It owns no collection state; callers re-fetch
//! to observe the true server state after a mutation.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::ClientOptions;
use crate::error::Result;
use crate::fetch::Fetch;
use crate::model::{AnalyticsSummary, TodoDraft, TodoId, TodoItem};

/// One operation per server capability
///
/// Kept as a trait so a stricter implementation (say, optimistic update with
/// rollback) can be substituted without touching the session logic.
#[async_trait]
pub trait Gateway {
    /// Fetch the full todo collection, in server order
    async fn list_all(&self) -> Result<Vec<TodoItem>>;

    /// Fetch the server-computed aggregate counts
    async fn fetch_analytics(&self) -> Result<AnalyticsSummary>;

    /// Create a todo from a local draft
    async fn create(&self, draft: &TodoDraft) -> Result<()>;

    /// Overwrite the fields of an existing todo
    async fn update(&self, id: TodoId, item: &TodoItem) -> Result<()>;

    /// Delete a single todo
    async fn remove(&self, id: TodoId) -> Result<()>;

    /// Mark a todo completed or uncompleted
    ///
    /// The target state is decided by the caller from the item's current
    /// state; this merely dispatches to the matching endpoint.
    async fn set_completion(&self, id: TodoId, completed: bool) -> Result<()>;

    /// Mark every todo completed
    async fn mark_all_completed(&self) -> Result<()>;

    /// Mark every todo uncompleted
    async fn mark_all_uncompleted(&self) -> Result<()>;

    /// Delete the entire collection
    async fn delete_all(&self) -> Result<()>;
}

/// Gateway implementation backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    http_client: Client,
    options: ClientOptions,
}

impl HttpGateway {
    /// Create a gateway for the given base endpoint, e.g.
    /// `http://localhost:8080/todos`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a gateway with custom client options
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        // Validate the endpoint up front rather than on first use
        Url::parse(&base_url)?;

        Ok(Self {
            base_url,
            http_client: Client::new(),
            options,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let url = if path.is_empty() {
            Url::parse(&self.base_url)?
        } else {
            Url::parse(&format!("{}/{}", self.base_url, path))?
        };
        Ok(url)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_all(&self) -> Result<Vec<TodoItem>> {
        Fetch::get(&self.http_client, self.endpoint("")?)
            .timeout(self.options.request_timeout)
            .execute()
            .await
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsSummary> {
        Fetch::get(&self.http_client, self.endpoint("analytics")?)
            .timeout(self.options.request_timeout)
            .execute()
            .await
    }

    async fn create(&self, draft: &TodoDraft) -> Result<()> {
        Fetch::post(&self.http_client, self.endpoint("addTodo")?)
            .timeout(self.options.request_timeout)
            .json(&draft.to_payload())?
            .execute_empty()
            .await
    }

    async fn update(&self, id: TodoId, item: &TodoItem) -> Result<()> {
        Fetch::put(&self.http_client, self.endpoint(&format!("update/{id}"))?)
            .timeout(self.options.request_timeout)
            .json(item)?
            .execute_empty()
            .await
    }

    async fn remove(&self, id: TodoId) -> Result<()> {
        Fetch::delete(&self.http_client, self.endpoint(&id.to_string())?)
            .timeout(self.options.request_timeout)
            .execute_empty()
            .await
    }

    async fn set_completion(&self, id: TodoId, completed: bool) -> Result<()> {
        let path = if completed {
            format!("markAsCompleted/{id}")
        } else {
            format!("markAsUncompleted/{id}")
        };
        Fetch::put(&self.http_client, self.endpoint(&path)?)
            .timeout(self.options.request_timeout)
            .execute_empty()
            .await
    }

    async fn mark_all_completed(&self) -> Result<()> {
        Fetch::put(&self.http_client, self.endpoint("markAllAsCompleted")?)
            .timeout(self.options.request_timeout)
            .execute_empty()
            .await
    }

    async fn mark_all_uncompleted(&self) -> Result<()> {
        Fetch::put(&self.http_client, self.endpoint("markAllAsUncompleted")?)
            .timeout(self.options.request_timeout)
            .execute_empty()
            .await
    }

    async fn delete_all(&self) -> Result<()> {
        Fetch::delete(&self.http_client, self.endpoint("deleteAll")?)
            .timeout(self.options.request_timeout)
            .execute_empty()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_on_the_base_endpoint_are_ignored() {
        let gateway = HttpGateway::new("http://localhost:8080/todos/").unwrap();
        let url = gateway.endpoint("analytics").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/todos/analytics");
    }

    #[test]
    fn invalid_base_endpoints_are_rejected_up_front() {
        assert!(HttpGateway::new("not a url").is_err());
    }
}
