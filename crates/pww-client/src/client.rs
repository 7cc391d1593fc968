//! Typed async client for the web API.
//!
//! ## API Paths
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/v1/user/me` | Caller profile (`Me`) |
//! | GET    | `/api/v1/policy` | Server policy |
//! | GET    | `/api/v1/user/{userid}` | CMS user details |
//! | POST   | `/api/v1/admin/managecms` | Update CMS user attributes |
//! | POST   | `/api/v1/user/new` | Register an account |
//! | GET    | `/api/v1/user/verify` | Verify a new account's email |
//!
//! Requests are sent once. A 404 maps to [`ApiError::NotFound`], a 400 with a
//! parsable `{errorcode, errorcontext}` body to [`ApiError::UserError`], and
//! every other non-2xx status to [`ApiError::Status`].

use std::time::Duration;

use pww_crypto::Identity;
use serde::de::DeserializeOwned;
use url::Url;

use crate::adapter::NewUserOutcome;
use crate::config::{ClientConfig, ConfigError};
use crate::error::ApiError;
use crate::types::{
    ErrorReply, LoginReply, ManageUser, ManageUserReply, NewUserReply, NewUserRequest,
    PolicyReply, UserDetailsReply, UserRecord, VerifyNewUserQuery, VerifyNewUserReply,
};

/// Path segments every route lives under.
const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Build the shared `reqwest` client from configuration.
pub(crate) fn http_client(config: &ClientConfig) -> Result<reqwest::Client, ApiError> {
    let mut headers = reqwest::header::HeaderMap::new();
    if let Some(session) = &config.session {
        let mut value =
            reqwest::header::HeaderValue::from_str(&format!("session={}", session.as_str()))
                .map_err(|_| ApiError::Config(ConfigError::InvalidSession))?;
        value.set_sensitive(true);
        headers.insert(reqwest::header::COOKIE, value);
    }

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .danger_accept_invalid_certs(config.skip_verify)
        .default_headers(headers)
        .build()
        .map_err(|e| ApiError::Http {
            endpoint: "client_init".into(),
            source: e,
        })
}

/// Client for the user and CMS routes of the web API.
#[derive(Debug, Clone)]
pub struct WwwClient {
    http: reqwest::Client,
    base_url: Url,
}

impl WwwClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::with_http(http_client(config)?, config.host.clone()))
    }

    pub(crate) fn with_http(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch the caller's own profile.
    ///
    /// Calls `GET {host}/api/v1/user/me`.
    pub async fn me(&self) -> Result<LoginReply, ApiError> {
        let url = self.url(&["user", "me"]);
        self.send("GET /user/me", self.http.get(url)).await
    }

    /// Fetch the server policy.
    ///
    /// Calls `GET {host}/api/v1/policy`.
    pub async fn policy(&self) -> Result<PolicyReply, ApiError> {
        let url = self.url(&["policy"]);
        self.send("GET /policy", self.http.get(url)).await
    }

    /// Fetch a user's CMS record.
    ///
    /// Calls `GET {host}/api/v1/user/{user_id}`.
    pub async fn user_details(&self, user_id: &str) -> Result<UserRecord, ApiError> {
        let endpoint = format!("GET /user/{user_id}");
        let url = self.url(&["user", user_id]);
        let reply: UserDetailsReply = self.send(&endpoint, self.http.get(url)).await?;
        Ok(reply.user)
    }

    /// Replace a user's domain, contractor type, and supervisors.
    ///
    /// Calls `POST {host}/api/v1/admin/managecms`.
    pub async fn manage_user(&self, request: &ManageUser) -> Result<ManageUserReply, ApiError> {
        let url = self.url(&["admin", "managecms"]);
        self.send("POST /admin/managecms", self.http.post(url).json(request))
            .await
    }

    /// Register an account bound to a freshly generated identity.
    ///
    /// Calls `POST {host}/api/v1/user/new`. The username is the local part
    /// of the email address.
    pub async fn new_user(&self, email: &str, password: &str) -> Result<NewUserOutcome, ApiError> {
        let identity = Identity::generate();
        let request = NewUserRequest {
            email: email.to_string(),
            password: password.to_string(),
            public_key: identity.public_key().to_hex(),
            username: email.split('@').next().unwrap_or(email).to_string(),
        };
        let url = self.url(&["user", "new"]);
        let reply: NewUserReply = self
            .send("POST /user/new", self.http.post(url).json(&request))
            .await?;

        Ok(NewUserOutcome {
            verification_token: reply.verification_token,
            identity,
            paywall_address: reply.paywall_address,
            paywall_amount: reply.paywall_amount,
        })
    }

    /// Submit the signed verification token for a new account.
    ///
    /// Calls `GET {host}/api/v1/user/verify?email=..&verificationtoken=..&signature=..`.
    pub async fn verify_new_user(
        &self,
        email: &str,
        verification_token: &str,
        signature: &str,
    ) -> Result<(), ApiError> {
        let url = self.url(&["user", "verify"]);
        let query = VerifyNewUserQuery {
            email,
            verification_token,
            signature,
        };
        let _: VerifyNewUserReply = self
            .send("GET /user/verify", self.http.get(url).query(&query))
            .await?;
        Ok(())
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(API_PREFIX.iter().chain(segments.iter()));
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(endpoint, "sending request");
        let resp = request.send().await.map_err(|e| ApiError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                endpoint: endpoint.into(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::BAD_REQUEST {
                if let Ok(reply) = serde_json::from_str::<ErrorReply>(&body) {
                    return Err(ApiError::UserError {
                        endpoint: endpoint.into(),
                        code: reply.error_code,
                        context: reply.error_context,
                    });
                }
            }
            tracing::warn!(endpoint, status = status.as_u16(), "request failed");
            return Err(ApiError::Status {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                body,
            });
        }

        resp.json().await.map_err(|e| ApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}
