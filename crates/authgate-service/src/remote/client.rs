//! JSON-over-HTTPS client for a remote identity service.
//!
//! The remote service owns the credential store and the token issuance;
//! this client only forwards `register` and `login` calls, retrying a
//! bounded number of times on an allow-list of transient outcomes and
//! never on validation or authorization failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use authgate_core::config::RemoteConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::Credentials;

use crate::identity::{AuthSession, IdentityService};

/// Pause between attempts; the per-attempt deadline comes from config.
const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Client for the remote identity service.
#[derive(Debug, Clone)]
pub struct RemoteIdentityClient {
    http: reqwest::Client,
    endpoint: String,
    app_name: String,
    max_attempts: u32,
}

impl RemoteIdentityClient {
    /// Builds the client from configuration.
    ///
    /// When `ca_cert_path` is set, the PEM certificate at that path is
    /// added as a trust root; generating the certificate is someone
    /// else's job.
    pub fn new(config: &RemoteConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.attempt_timeout_seconds));

        if !config.ca_cert_path.is_empty() {
            let pem = std::fs::read(&config.ca_cert_path).map_err(|e| {
                AppError::configuration(format!(
                    "Failed to read root certificate {}: {e}",
                    config.ca_cert_path
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                AppError::configuration(format!("Invalid root certificate: {e}"))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            app_name: config.app_name.clone(),
            max_attempts: config.max_attempts.max(1),
        })
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> AppResult<AuthSession> {
        let url = format!("{}/rpc/{method}", self.endpoint);
        let mut last_err: Option<AppError> = None;

        for attempt in 1..=self.max_attempts {
            debug!(method, attempt, "Identity RPC payload sent");

            match self.http.post(&url).json(&body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let session: AuthSession = response.json().await.map_err(|e| {
                            AppError::external_service(format!(
                                "Malformed identity service response: {e}"
                            ))
                        })?;
                        debug!(method, user_id = %session.user_id, "Identity RPC payload received");
                        return Ok(session);
                    }

                    let err = map_status(status);
                    if !is_retryable(status) {
                        return Err(err);
                    }
                    warn!(method, attempt, status = %status, "Transient identity RPC failure");
                    last_err = Some(err);
                }
                Err(e) if e.is_timeout() => {
                    warn!(method, attempt, "Identity RPC attempt hit its deadline");
                    last_err = Some(AppError::timeout("Identity service call timed out"));
                }
                Err(e) => {
                    return Err(AppError::external_service(format!(
                        "Identity service unreachable: {e}"
                    )));
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }

        Err(last_err
            .unwrap_or_else(|| AppError::external_service("Identity service call failed")))
    }
}

#[async_trait]
impl IdentityService for RemoteIdentityClient {
    async fn register(&self, credentials: Credentials) -> AppResult<AuthSession> {
        self.call(
            "register",
            serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }),
        )
        .await
    }

    async fn login(&self, credentials: Credentials) -> AppResult<AuthSession> {
        self.call(
            "login",
            serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
                "app_name": self.app_name,
            }),
        )
        .await
    }
}

/// Allow-list of transient outcomes worth another attempt: the HTTP
/// analogues of not-found, aborted, and deadline-exceeded.
fn is_retryable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::NOT_FOUND | StatusCode::CONFLICT | StatusCode::REQUEST_TIMEOUT
    )
}

fn map_status(status: StatusCode) -> AppError {
    match status {
        StatusCode::BAD_REQUEST => {
            AppError::validation("Identity service rejected the request body")
        }
        StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
            AppError::unauthorized("wrong email or password")
        }
        StatusCode::CONFLICT => AppError::conflict("Email already in use"),
        StatusCode::REQUEST_TIMEOUT => AppError::timeout("Identity service call timed out"),
        StatusCode::SERVICE_UNAVAILABLE => {
            AppError::service_unavailable("Identity service unavailable")
        }
        other => AppError::external_service(format!("Identity service returned {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_core::error::ErrorKind;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Minimal HTTP server answering every request with one status line.
    async fn spawn_status_server(status_line: &'static str, hits: Arc<AtomicUsize>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                hits.fetch_add(1, Ordering::SeqCst);

                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        format!("http://{addr}")
    }

    fn client_for(endpoint: String, max_attempts: u32) -> RemoteIdentityClient {
        let config = RemoteConfig {
            endpoint,
            max_attempts,
            ..RemoteConfig::default()
        };
        RemoteIdentityClient::new(&config).expect("client")
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried_up_to_the_attempt_limit() {
        let hits = Arc::new(AtomicUsize::new(0));
        let endpoint = spawn_status_server("404 Not Found", Arc::clone(&hits)).await;
        let client = client_for(endpoint, 2);

        let started = std::time::Instant::now();
        let err = client
            .login(Credentials::new("a@x.com", "p1"))
            .await
            .expect_err("attempts exhausted");

        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        // One pause between the two attempts, none after the last one.
        assert!(started.elapsed() < RETRY_DELAY * 2);
    }

    #[tokio::test]
    async fn test_non_retryable_failure_returns_after_one_attempt() {
        let hits = Arc::new(AtomicUsize::new(0));
        let endpoint = spawn_status_server("400 Bad Request", Arc::clone(&hits)).await;
        let client = client_for(endpoint, 5);

        let err = client
            .register(Credentials::new("a@x.com", "p1"))
            .await
            .expect_err("rejected");

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retry_allow_list() {
        assert!(is_retryable(StatusCode::NOT_FOUND));
        assert!(is_retryable(StatusCode::CONFLICT));
        assert!(is_retryable(StatusCode::REQUEST_TIMEOUT));

        assert!(!is_retryable(StatusCode::BAD_REQUEST));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_status_mapping_hides_account_existence() {
        let not_found = map_status(StatusCode::NOT_FOUND);
        let unauthorized = map_status(StatusCode::UNAUTHORIZED);

        assert_eq!(not_found.kind, ErrorKind::Unauthorized);
        assert_eq!(not_found.message, unauthorized.message);
    }

    #[test]
    fn test_status_mapping_kinds() {
        assert_eq!(
            map_status(StatusCode::BAD_REQUEST).kind,
            ErrorKind::Validation
        );
        assert_eq!(map_status(StatusCode::CONFLICT).kind, ErrorKind::Conflict);
        assert_eq!(
            map_status(StatusCode::REQUEST_TIMEOUT).kind,
            ErrorKind::Timeout
        );
        assert_eq!(
            map_status(StatusCode::BAD_GATEWAY).kind,
            ErrorKind::ExternalService
        );
    }
}
