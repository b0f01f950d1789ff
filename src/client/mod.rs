//! Client layer: orchestrates transport calls and drives the consent flow.

mod location;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::retry::{self, DEFAULT_RETRY_PARAM};
use crate::domain::{
    AuthorizationRequest, AuthorizeOutcome, ConsentUrl, ConsentUrlRequest, Redirect, ReturnUrl,
    Scope, ValidationError,
};

pub use location::{Location, MemoryLocation};

const DEFAULT_API_PREFIX: &str = "/att";
const CHECK_PATH: &str = "/check";
const USER_AUTH_URL_PATH: &str = "/oauth/userAuthUrl";
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Query parameter the consent flow appends to `returnUrl` on failure.
pub const CONSENT_ERROR_PARAM: &str = "error";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`AuthorizationClient`].
///
/// Network failures surface as [`AuthorizationError::Transport`] or
/// [`AuthorizationError::HttpStatus`]; missing caller input as
/// [`AuthorizationError::Validation`] before any request is sent.
pub enum AuthorizationError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body was not JSON or lacked the expected field.
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] Box<dyn StdError + Send + Sync>),

    /// The consent flow redirected back with an `error` query parameter.
    #[error("consent flow failed: {message}")]
    Consent { message: String },

    /// The retry counter on `returnUrl` exceeded the configured budget.
    #[error("too many authorization attempts ({attempts}, max {max}) - aborting")]
    TooManyRetries { attempts: u32, max: u32 },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl AuthorizationError {
    /// Names of the required parameters the caller left out, if that is
    /// what went wrong.
    pub fn missing_parameters(&self) -> Option<&[&'static str]> {
        match self {
            Self::Validation(ValidationError::MissingParameters { fields }) => {
                Some(fields.as_slice())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`AuthorizationClient`].
///
/// This is the whole client configuration: server location, endpoint
/// overrides, retry budget and HTTP settings.
pub struct AuthorizationClientBuilder {
    server_path: String,
    api_prefix: String,
    check_endpoint: Option<String>,
    consent_endpoint: Option<String>,
    retry_param: String,
    max_retries: u32,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AuthorizationClientBuilder {
    /// Start from the SDK server base URL, e.g. `https://app.example.com`.
    pub fn new(server_path: impl Into<String>) -> Self {
        Self {
            server_path: server_path.into(),
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            check_endpoint: None,
            consent_endpoint: None,
            retry_param: DEFAULT_RETRY_PARAM.to_owned(),
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: None,
            user_agent: None,
        }
    }

    /// Path prepended to every endpoint (default `/att`).
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Override the full URL of the scope check endpoint.
    pub fn check_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.check_endpoint = Some(endpoint.into());
        self
    }

    /// Override the full URL of the consent URL endpoint.
    pub fn consent_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.consent_endpoint = Some(endpoint.into());
        self
    }

    /// Query key carrying the retry counter inside `returnUrl`.
    pub fn retry_param(mut self, key: impl Into<String>) -> Self {
        self.retry_param = key.into();
        self
    }

    /// Largest retry counter still allowed to redirect (default 2).
    pub fn max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`AuthorizationClient`].
    pub fn build(self) -> Result<AuthorizationClient, AuthorizationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        let client = builder
            .build()
            .map_err(|err| AuthorizationError::Transport(Box::new(err)))?;

        self.build_with(Arc::new(ReqwestTransport { client }))
    }

    fn build_with(
        self,
        http: Arc<dyn HttpTransport>,
    ) -> Result<AuthorizationClient, AuthorizationError> {
        let check_endpoint = self.endpoint(self.check_endpoint.as_deref(), CHECK_PATH)?;
        let consent_endpoint =
            self.endpoint(self.consent_endpoint.as_deref(), USER_AUTH_URL_PATH)?;
        if self.retry_param.trim().is_empty() {
            return Err(ValidationError::MissingParameters {
                fields: vec!["retry_param"],
            }
            .into());
        }

        Ok(AuthorizationClient {
            check_endpoint,
            consent_endpoint,
            retry_param: self.retry_param,
            max_retries: self.max_retries,
            http,
        })
    }

    fn endpoint(&self, custom: Option<&str>, path: &str) -> Result<Url, ValidationError> {
        let raw = match custom {
            Some(endpoint) => endpoint.to_owned(),
            None => {
                let server = self.server_path.trim_end_matches('/');
                match self.api_prefix.trim_matches('/') {
                    "" => format!("{server}{path}"),
                    prefix => format!("{server}/{prefix}{path}"),
                }
            }
        };
        Url::parse(&raw).map_err(|_| ValidationError::InvalidUrl {
            field: "server_path",
            input: raw,
        })
    }
}

#[derive(Clone)]
/// Client for the SDK server authorization endpoints.
///
/// By default it talks to:
/// - `<server>/att/check` to ask whether a scope is already authorized
/// - `<server>/att/oauth/userAuthUrl` to obtain a consent page URL
///
/// [`AuthorizationClient::authorize`] combines both into the consent
/// redirect protocol, bounded by a retry counter carried in `returnUrl`.
pub struct AuthorizationClient {
    check_endpoint: Url,
    consent_endpoint: Url,
    retry_param: String,
    max_retries: u32,
    http: Arc<dyn HttpTransport>,
}

impl AuthorizationClient {
    /// Create a client for the SDK server at `server_path` with default settings.
    pub fn new(server_path: impl Into<String>) -> Result<Self, AuthorizationError> {
        Self::builder(server_path).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(server_path: impl Into<String>) -> AuthorizationClientBuilder {
        AuthorizationClientBuilder::new(server_path)
    }

    /// Ask the server whether the user already granted every service in `scope`.
    ///
    /// Errors:
    /// - [`AuthorizationError::Transport`] / [`AuthorizationError::HttpStatus`] on
    ///   network or HTTP failure,
    /// - [`AuthorizationError::MalformedResponse`] when `authorized` is missing or
    ///   not a boolean.
    pub async fn is_authorized(&self, scope: &Scope) -> Result<bool, AuthorizationError> {
        let body = self
            .get(&self.check_endpoint, crate::transport::encode_check_query(scope))
            .await?;
        let status = crate::transport::decode_check_json_response(&body)
            .map_err(|err| AuthorizationError::MalformedResponse(Box::new(err)))?;

        tracing::debug!(scope = %scope, authorized = status.authorized, "checked scope");
        Ok(status.authorized)
    }

    /// Fetch the consent page URL for `request`.
    ///
    /// Required parameters are enforced when the request is built (see
    /// [`ConsentUrlRequest::from_params`]), so no call is made without them.
    pub async fn consent_url(
        &self,
        request: &ConsentUrlRequest,
    ) -> Result<ConsentUrl, AuthorizationError> {
        let body = self
            .get(
                &self.consent_endpoint,
                crate::transport::encode_user_auth_url_query(request),
            )
            .await?;
        crate::transport::decode_user_auth_url_json_response(&body)
            .map_err(|err| AuthorizationError::MalformedResponse(Box::new(err)))
    }

    /// Make sure the user has authorized `request.scope()`, getting consent if
    /// necessary.
    ///
    /// Terminal states:
    /// - `error` present in the current location's query: [`AuthorizationError::Consent`];
    /// - scope authorized and `location` already at `returnUrl`:
    ///   [`AuthorizeOutcome::AlreadyAuthorized`], nothing navigated;
    /// - scope authorized elsewhere: navigate to `returnUrl` unchanged;
    /// - retry counter above the budget: [`AuthorizationError::TooManyRetries`],
    ///   nothing navigated and no consent request sent;
    /// - otherwise navigate to the consent page, with `returnUrl` carrying the
    ///   incremented retry counter.
    ///
    /// The check always completes before the consent URL is requested.
    pub async fn authorize(
        &self,
        request: &AuthorizationRequest,
        location: &dyn Location,
    ) -> Result<AuthorizeOutcome, AuthorizationError> {
        let current = location.href();
        let return_url = request
            .return_url()
            .cloned()
            .unwrap_or_else(|| ReturnUrl::from(current.clone()));

        if let Some(message) = retry::query_param(&current, CONSENT_ERROR_PARAM) {
            tracing::warn!(error = %message, "consent flow reported an error");
            return Err(AuthorizationError::Consent { message });
        }

        if request.skips_auth_check() {
            tracing::debug!(scope = %request.scope(), "skipping authorization check");
        } else if self.is_authorized(request.scope()).await? {
            if current == *return_url.as_url() {
                tracing::info!(scope = %request.scope(), "already authorized");
                return Ok(AuthorizeOutcome::AlreadyAuthorized);
            }
            tracing::info!(
                scope = %request.scope(),
                return_url = %return_url,
                "already authorized; returning"
            );
            location.navigate(return_url.as_url());
            return Ok(AuthorizeOutcome::Redirected(Redirect::ReturnUrl(return_url)));
        }

        let attempts = [return_url.as_url(), &current]
            .into_iter()
            .filter_map(|url| retry::read_retry_count(url, &self.retry_param))
            .max()
            .unwrap_or_default();
        if attempts.get() > self.max_retries {
            tracing::warn!(
                attempts = attempts.get(),
                max = self.max_retries,
                "authorization retry budget exhausted"
            );
            return Err(AuthorizationError::TooManyRetries {
                attempts: attempts.get(),
                max: self.max_retries,
            });
        }

        let return_url = ReturnUrl::from(retry::with_retry_count(
            return_url.as_url(),
            &self.retry_param,
            attempts.next(),
        ));
        let consent_request = ConsentUrlRequest::new(request.scope().clone(), return_url);
        let consent_url = self.consent_url(&consent_request).await?;

        tracing::info!(
            scope = %request.scope(),
            attempt = attempts.next().get(),
            consent_url = %consent_url,
            "redirecting to consent flow"
        );
        location.navigate(consent_url.as_url());
        Ok(AuthorizeOutcome::Redirected(Redirect::Consent(consent_url)))
    }

    async fn get(
        &self,
        endpoint: &Url,
        params: Vec<(String, String)>,
    ) -> Result<String, AuthorizationError> {
        let mut url = endpoint.clone();
        url.query_pairs_mut().extend_pairs(params);

        tracing::debug!(url = %url, "sending request");
        let response = self
            .http
            .get(url)
            .await
            .map_err(AuthorizationError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(AuthorizationError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}
