use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Where the contact backend lives when nobody configures anything
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

const SUBMIT_PATH: &str = "/contact/submit";

/// What we show when the server says no without saying why
const DEFAULT_REJECTION: &str = "Failed to send message";

#[derive(Error, Debug)]
pub enum ContactError {
    /// Non-2xx status or `success: false`; carries the message for the user
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response from contact service: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ContactError>;

/// Body of `POST /contact/submit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// What the contact service answers with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// A successful submission, plus whatever the server had to say about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAck {
    pub message: Option<String>,
}

pub struct ContactClient {
    client: reqwest::Client,
    base_url: String,
}

impl ContactClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Point the client at a specific API base, e.g. `https://api.example.com/api`
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("TourEase/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Bring your own `reqwest::Client` (timeouts, proxies, ...)
    pub fn from_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full submission URL; tolerates a trailing slash on the base
    pub fn submit_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SUBMIT_PATH)
    }

    /// Send the form exactly once, no retries
    pub async fn submit(&self, request: &ContactRequest) -> Result<ContactAck> {
        let url = self.submit_url();
        debug!("Submitting contact form to {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match interpret_response(status, &body) {
            Ok(ack) => {
                info!("Contact form accepted ({})", status);
                Ok(ack)
            }
            Err(e) => {
                warn!("Contact form not accepted ({}): {}", status, e);
                Err(e)
            }
        }
    }
}

/// Turn a status + raw body into an outcome
///
/// Both a 2xx status and `success: true` are required.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<ContactAck> {
    match serde_json::from_str::<ContactResponse>(body) {
        Ok(parsed) if status.is_success() && parsed.success => Ok(ContactAck {
            message: parsed.message,
        }),
        Ok(parsed) => Err(ContactError::Rejected(
            parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
        )),
        // Error pages from proxies are usually HTML, not our JSON
        Err(_) if !status.is_success() => {
            Err(ContactError::Rejected(DEFAULT_REJECTION.to_string()))
        }
        Err(e) => Err(ContactError::InvalidResponse(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn local_client(base: String) -> ContactClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        ContactClient::from_client(client, base)
    }

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            subject: String::new(),
            message: "Do you plan trips to Kyoto?".to_string(),
        }
    }

    /// Serve exactly one request with a canned response, hand back the raw request
    async fn one_shot_server(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            // Read headers, then as much body as Content-Length says
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);

                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            let value = lower.strip_prefix("content-length:")?;
                            value.trim().parse::<usize>().ok()
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&raw).to_string()
        });

        (format!("http://{}/api", addr), handle)
    }

    #[test]
    fn test_submit_url_handles_trailing_slash() {
        let client = ContactClient::with_base_url("http://localhost:5000/api/").unwrap();
        assert_eq!(client.submit_url(), "http://localhost:5000/api/contact/submit");

        let client = ContactClient::new().unwrap();
        assert_eq!(client.submit_url(), "http://localhost:5000/api/contact/submit");
    }

    #[test]
    fn test_interpret_success() {
        let ack = interpret_response(StatusCode::OK, r#"{"success":true,"message":"Got it"}"#).unwrap();
        assert_eq!(ack.message.as_deref(), Some("Got it"));

        let ack = interpret_response(StatusCode::CREATED, r#"{"success":true}"#).unwrap();
        assert_eq!(ack.message, None);
    }

    #[test]
    fn test_interpret_success_false_uses_server_message() {
        let err = interpret_response(StatusCode::OK, r#"{"success":false,"message":"Email is invalid"}"#)
            .unwrap_err();
        assert!(matches!(err, ContactError::Rejected(ref m) if m == "Email is invalid"));
    }

    #[test]
    fn test_interpret_error_status_without_message() {
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"success":true}"#).unwrap_err();
        assert_eq!(err.to_string(), "Failed to send message");

        let err = interpret_response(StatusCode::BAD_REQUEST, r#"{"success":false,"message":""}"#).unwrap_err();
        assert_eq!(err.to_string(), "Failed to send message");
    }

    #[test]
    fn test_interpret_html_error_page() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, "<html>502</html>").unwrap_err();
        assert!(matches!(err, ContactError::Rejected(_)));
    }

    #[test]
    fn test_interpret_garbage_on_success_status() {
        let err = interpret_response(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, ContactError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_submit_posts_json_body() {
        let (base, server) = one_shot_server("HTTP/1.1 200 OK", r#"{"success":true,"message":"Thanks"}"#).await;
        let client = local_client(base);

        let ack = client.submit(&request()).await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Thanks"));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/contact/submit"));
        assert!(raw.contains("\"email\":\"jane@example.com\""));
        assert!(raw.contains("\"subject\":\"\""));
    }

    #[tokio::test]
    async fn test_submit_surfaces_server_rejection() {
        let (base, server) = one_shot_server(
            "HTTP/1.1 422 Unprocessable Entity",
            r#"{"success":false,"message":"Message too short"}"#,
        )
        .await;
        let client = local_client(base);

        let err = client.submit(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Message too short");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_network_failure() {
        // Grab a free port, then close it so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(format!("http://{}/api", addr));
        let err = client.submit(&request()).await.unwrap_err();
        assert!(matches!(err, ContactError::Network(_)));
    }
}
