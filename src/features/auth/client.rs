use std::sync::Arc;
use validator::Validate;

use crate::core::config::ApiConfig;
use crate::core::error::{response_message, AppError, Result};
use crate::features::auth::dto::{LoginRequestDto, TokenResponseDto};
use crate::features::auth::session::{Session, SessionStore};

/// Client for the identity endpoint. Login is the only request in the whole
/// application that is form-encoded rather than JSON.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl AuthClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            session,
        })
    }

    /// Exchange credentials for a bearer token, persist the session and
    /// return it. A rejected login leaves any existing session untouched.
    pub async fn login(&self, credentials: &LoginRequestDto) -> Result<Session> {
        credentials.validate().map_err(AppError::from_validation)?;

        tracing::debug!("Requesting token from {}/auth/login", self.base_url);

        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.email.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(AppError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Login rejected for {}: HTTP {status}", credentials.email);
            return Err(AppError::Auth(response_message(&body)));
        }

        let token: TokenResponseDto = response
            .json()
            .await
            .map_err(|e| AppError::Request(format!("Failed to parse login response: {e}")))?;

        let session = Session {
            access_token: token.access_token,
            user_id: token.user_id,
            email: token.email,
            role: token.role,
        };
        self.session.store(session.clone())?;

        tracing::info!("Logged in as {} ({})", session.email, session.role);
        Ok(session)
    }

    /// Drop the persisted session. Idempotent.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::session::Role;
    use crate::shared::test_helpers::one_shot_server;
    use std::time::Duration;
    use tempfile::TempDir;

    fn auth_client(base_url: String, dir: &TempDir) -> (Arc<SessionStore>, AuthClient) {
        let config = ApiConfig {
            base_url,
            timeout: Duration::from_secs(5),
        };
        let session = Arc::new(SessionStore::open(dir.path().join("session.json")));
        let client = AuthClient::new(&config, session.clone()).unwrap();
        (session, client)
    }

    fn credentials() -> LoginRequestDto {
        LoginRequestDto {
            email: "fatima@example.com".to_string(),
            password: "motdepasse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_sends_form_encoded_password_grant() {
        let dir = TempDir::new().unwrap();
        let (url, server) = one_shot_server(
            "HTTP/1.1 200 OK",
            r#"{"access_token": "token-abc", "token_type": "bearer", "role": "citizen", "user_id": 7, "email": "fatima@example.com"}"#,
        )
        .await;
        let (session, client) = auth_client(url, &dir);

        let logged_in = client.login(&credentials()).await.unwrap();

        assert_eq!(logged_in.user_id, 7);
        assert_eq!(logged_in.role, Role::Citizen);
        assert_eq!(logged_in.access_token, "token-abc");
        assert_eq!(session.current(), Some(logged_in));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /auth/login "), "request: {request}");
        assert!(
            request
                .to_lowercase()
                .contains("content-type: application/x-www-form-urlencoded"),
            "request: {request}"
        );
        let body = request.split("\r\n\r\n").nth(1).unwrap_or_default();
        assert!(body.contains("grant_type=password"), "body: {body}");
        assert!(body.contains("username=fatima%40example.com"), "body: {body}");
        assert!(body.contains("password=motdepasse"), "body: {body}");
    }

    #[tokio::test]
    async fn test_rejected_login_is_an_auth_error_and_keeps_existing_session() {
        let dir = TempDir::new().unwrap();
        let (url, _server) = one_shot_server(
            "HTTP/1.1 401 Unauthorized",
            r#"{"detail": "Incorrect email or password"}"#,
        )
        .await;
        let (session, client) = auth_client(url, &dir);

        let existing = Session {
            access_token: "old-token".to_string(),
            user_id: 3,
            email: "admin@ville.ma".to_string(),
            role: Role::Admin,
        };
        session.store(existing.clone()).unwrap();

        let error = client.login(&credentials()).await.unwrap_err();

        match error {
            AppError::Auth(message) => assert_eq!(message, "Incorrect email or password"),
            other => panic!("expected Auth error, got {other:?}"),
        }
        // A rejected login is a no-op on the stored session
        assert_eq!(session.current(), Some(existing));
    }

    #[tokio::test]
    async fn test_login_with_invalid_email_sends_no_request() {
        let dir = TempDir::new().unwrap();
        // Nothing listens here; validation must fail before any request
        let (_session, client) = auth_client("http://127.0.0.1:1".to_string(), &dir);

        let error = client
            .login(&LoginRequestDto {
                email: "pas-un-email".to_string(),
                password: "motdepasse".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
    }
}
