//! HTTP client for the directory backend REST API

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::Employee;

/// HTTP client wrapping the backend's five employee endpoints.
///
/// Each call is a single request/response cycle; there is no retry,
/// no deduplication and no session state beyond the configured base URL.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a new directory client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch all employees, in backend order
    pub async fn list_all(&self) -> ClientResult<Vec<Employee>> {
        tracing::debug!("GET /all");
        let response = self.client.get(self.url("all")).send().await?;
        Self::handle_response(response).await
    }

    /// Fetch a single employee by id.
    ///
    /// Any error status from the backend surfaces as [`ClientError::NotFound`].
    pub async fn find(&self, id: &str) -> ClientResult<Employee> {
        tracing::debug!("GET /find/{id}");
        let response = self.client.get(self.url(&format!("find/{id}"))).send().await?;
        Self::handle_response(response).await.map_err(|err| match err {
            ClientError::Status { .. } => ClientError::NotFound(id.to_string()),
            other => other,
        })
    }

    /// Create a new employee; the backend assigns the id
    pub async fn create(&self, employee: &Employee) -> ClientResult<Employee> {
        tracing::debug!("POST /add");
        let response = self.client.post(self.url("add")).json(employee).send().await?;
        Self::handle_response(response).await
    }

    /// Update an existing employee, identified by the payload's `id`
    pub async fn update(&self, employee: &Employee) -> ClientResult<Employee> {
        tracing::debug!("PUT /update");
        let response = self
            .client
            .put(self.url("update"))
            .json(employee)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Delete an employee by id; the response carries no content
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        tracing::debug!("DELETE /delete/{id}");
        let response = self
            .client
            .delete(self.url(&format!("delete/{id}")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!("delete failed: {status} {body}");
            return Err(ClientError::Status { status, body });
        }
        Ok(())
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!("request failed: {status} {body}");
            return Err(ClientError::Status { status, body });
        }

        response.json().await.map_err(Into::into)
    }
}
