//! Deletion API collaborator.

use super::request::ClearDatabaseRequest;
use async_trait::async_trait;
use pathscope_db::DbPool;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One entry of a server error payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub context: String,
    pub message: String,
}

/// Failure reported by the deletion API.
#[derive(Debug, Clone, Default)]
pub struct ClearDatabaseError {
    /// HTTP status when the failure came off the wire.
    pub status: Option<u16>,
    pub errors: Vec<ApiErrorDetail>,
}

impl ClearDatabaseError {
    /// The server-supplied message. Present only for a 500 with a populated
    /// error list; callers fall back to a generic message otherwise.
    pub fn server_message(&self) -> Option<String> {
        if self.status == Some(500) {
            self.errors.first().map(|e| e.message.clone())
        } else {
            None
        }
    }
}

/// The deletion endpoint, transport unspecified.
#[async_trait]
pub trait ClearDatabaseApi {
    async fn clear_database(
        &self,
        request: &ClearDatabaseRequest,
    ) -> Result<(), ClearDatabaseError>;
}

/// HTTP implementation against a running pathscope server.
pub struct HttpClearDatabaseApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClearDatabaseApi {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[async_trait]
impl ClearDatabaseApi for HttpClearDatabaseApi {
    async fn clear_database(
        &self,
        request: &ClearDatabaseRequest,
    ) -> Result<(), ClearDatabaseError> {
        let url = format!("{}/api/v2/clear-database", self.base_url);
        let mut req = self.client.post(&url).json(request);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await.map_err(|e| {
            warn!(error = %e, "clear-database request did not reach the server");
            ClearDatabaseError::default()
        })?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let errors = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.errors)
            .unwrap_or_default();

        Err(ClearDatabaseError {
            status: Some(status),
            errors,
        })
    }
}

/// In-process implementation running against the local store.
pub struct LocalClearDatabaseApi {
    pool: DbPool,
}

impl LocalClearDatabaseApi {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClearDatabaseApi for LocalClearDatabaseApi {
    async fn clear_database(
        &self,
        request: &ClearDatabaseRequest,
    ) -> Result<(), ClearDatabaseError> {
        super::run_clear_database(&self.pool, request)
            .await
            .map(|_| ())
            .map_err(|e| ClearDatabaseError {
                status: Some(500),
                errors: vec![ApiErrorDetail {
                    context: "clear-database".to_string(),
                    message: e.to_string(),
                }],
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_requires_500_and_errors() {
        let error = ClearDatabaseError {
            status: Some(500),
            errors: vec![ApiErrorDetail {
                context: String::new(),
                message: "disk full".into(),
            }],
        };
        assert_eq!(error.server_message().as_deref(), Some("disk full"));

        let wrong_status = ClearDatabaseError {
            status: Some(403),
            errors: error.errors.clone(),
        };
        assert_eq!(wrong_status.server_message(), None);

        let empty_list = ClearDatabaseError {
            status: Some(500),
            errors: Vec::new(),
        };
        assert_eq!(empty_list.server_message(), None);

        assert_eq!(ClearDatabaseError::default().server_message(), None);
    }
}
