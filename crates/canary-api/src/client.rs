//! HTTP client for the regression backend

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use canary_core::prelude::*;
use canary_core::{RunDetail, RunId, TestCase, TestCaseDraft, TestCaseId, TestRun};

use crate::backend::{Backend, ExecuteRunRequest, ExecuteRunResponse, TestCaseList};

/// Default request timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client over the backend's REST endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    /// `base_url` + `prefix`, no trailing slash
    root: String,
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8000`) with
    /// every endpoint under `prefix` (e.g. `/api/v1`).
    pub fn new(base_url: &str, prefix: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|_| Error::invalid_url(base_url))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::invalid_url(base_url));
        }

        let prefix = prefix.trim_matches('/');
        let root = if prefix.is_empty() {
            base.as_str().trim_end_matches('/').to_string()
        } else {
            format!("{}/{}", base.as_str().trim_end_matches('/'), prefix)
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {}", e)))?;

        debug!("API client targeting {}", root);
        Ok(Self { client, root })
    }

    /// Endpoint root, e.g. `http://localhost:8000/api/v1`
    pub fn root(&self) -> &str {
        &self.root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }
}

impl Backend for ApiClient {
    async fn list_test_cases(&self) -> Result<Vec<TestCase>> {
        let url = self.url("/test-cases/");
        trace!("GET {}", url);
        let resp = self.client.get(&url).send().await.map_err(transport)?;
        let list: TestCaseList = read_json(resp, "Test cases").await?;
        Ok(list.into_vec())
    }

    async fn create_test_case(&self, draft: &TestCaseDraft) -> Result<TestCase> {
        let url = self.url("/test-cases/");
        debug!("POST {} ({})", url, draft.name);
        let resp = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        read_json(resp, "Test case").await
    }

    async fn update_test_case(&self, id: TestCaseId, draft: &TestCaseDraft) -> Result<TestCase> {
        let url = self.url(&format!("/test-cases/{}", id));
        debug!("PUT {}", url);
        let resp = self
            .client
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        read_json(resp, &format!("Test case {}", id)).await
    }

    async fn delete_test_case(&self, id: TestCaseId) -> Result<()> {
        let url = self.url(&format!("/test-cases/{}", id));
        debug!("DELETE {}", url);
        let resp = self.client.delete(&url).send().await.map_err(transport)?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(resp, &format!("Test case {}", id)).await)
        }
    }

    async fn list_test_runs(&self) -> Result<Vec<TestRun>> {
        let url = self.url("/test-runs/");
        trace!("GET {}", url);
        let resp = self.client.get(&url).send().await.map_err(transport)?;
        read_json(resp, "Test runs").await
    }

    async fn execute_run(&self, request: &ExecuteRunRequest) -> Result<ExecuteRunResponse> {
        let url = self.url("/test-runs/execute");
        info!(
            "Executing test run '{}' (commit {}, branch {})",
            request.run_name, request.git_commit, request.git_branch
        );
        let resp = self
            .client
            .post(&url)
            .query(request)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(transport)?;
        read_json(resp, "Test run").await
    }

    async fn run_detail(&self, id: RunId) -> Result<RunDetail> {
        let url = self.url(&format!("/test-runs/{}/results", id));
        trace!("GET {}", url);
        let resp = self.client.get(&url).send().await.map_err(transport)?;
        read_json(resp, &format!("Test run {}", id)).await
    }
}

// ─────────────────────────────────────────────────────────────────
// Response handling
// ─────────────────────────────────────────────────────────────────

fn transport(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::http("request timed out")
    } else if err.is_connect() {
        Error::http(format!("could not connect to backend: {}", err))
    } else {
        Error::http(err.to_string())
    }
}

/// Decode a 2xx body as `T`, or turn a non-2xx response into an error
async fn read_json<T: DeserializeOwned>(resp: Response, resource: &str) -> Result<T> {
    if !resp.status().is_success() {
        return Err(error_from_response(resp, resource).await);
    }
    let bytes = resp.bytes().await.map_err(transport)?;
    serde_json::from_slice(&bytes).map_err(|e| Error::decode(format!("{}: {}", resource, e)))
}

async fn error_from_response(resp: Response, resource: &str) -> Error {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if status == StatusCode::NOT_FOUND {
        warn!("{} not found (404)", resource);
        return Error::not_found(resource);
    }

    let message = detail_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());
    warn!("Backend returned {} for {}: {}", status.as_u16(), resource, message);
    Error::api(status.as_u16(), message)
}

/// Extract FastAPI's `detail` field.
///
/// `detail` is a string for `HTTPException` and a list of
/// `{loc, msg, type}` objects for request validation failures.
fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_joins_base_and_prefix() {
        let c = ApiClient::new("http://localhost:8000", "/api/v1", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(c.root(), "http://localhost:8000/api/v1");
        assert_eq!(c.url("/test-runs/"), "http://localhost:8000/api/v1/test-runs/");

        let c = ApiClient::new("http://example.com/", "api/v1/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(c.root(), "http://example.com/api/v1");

        let c = ApiClient::new("http://example.com", "", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(c.root(), "http://example.com");
    }

    #[test]
    fn test_rejects_invalid_urls() {
        assert!(matches!(
            ApiClient::new("not a url", "/api/v1", DEFAULT_TIMEOUT),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            ApiClient::new("ftp://host", "/api/v1", DEFAULT_TIMEOUT),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_detail_message_string() {
        assert_eq!(
            detail_message(r#"{"detail": "No active test cases found"}"#),
            Some("No active test cases found".to_string())
        );
    }

    #[test]
    fn test_detail_message_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "field required", "type": "missing"}]}"#;
        assert_eq!(detail_message(body), Some("field required".to_string()));
    }

    #[test]
    fn test_detail_message_absent() {
        assert_eq!(detail_message("Internal Server Error"), None);
        assert_eq!(detail_message(r#"{"error": "x"}"#), None);
    }
}
