//! Client layer: signs requests, orchestrates transport calls and maps transport ↔ domain.

pub mod auth;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::{
    ApiErrorDetail, EmailAddress, EmailOptions, Notification, NotificationFilter, NotificationId,
    NotificationList, OptionsError, PreviewTemplate, RawPhoneNumber, ReceivedTextFilter,
    ReceivedTextList, SendEmail, SendEmailResponse, SendSms, SendSmsResponse, SmsOptions,
    Template, TemplateId, TemplateList, TemplatePreview, TemplateType, TemplateVersion,
    ValidationError,
};
use crate::transport::{self, ApiRequest, Method};

pub use auth::{
    Clock, Credentials, FixedClock, IssuerId, SigningSecret, SystemClock, TokenError, TokenSigner,
    sign_token,
};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://rest-api.notify.gov.au";

const USER_AGENT_PREFIX: &str = "NOTIFY-API-RUST-CLIENT";

const API_KEY_ENV: &str = "NOTIFY_API_KEY";
const BASE_URL_ENV: &str = "NOTIFY_BASE_URL";
const PROXY_URL_ENV: &str = "NOTIFY_PROXY_URL";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

/// A fully bound request: absolute URL, headers and optional proxy.
#[derive(Debug, Clone, PartialEq)]
struct HttpRequest {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    proxy: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug)]
struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
    proxied: Mutex<Option<(String, reqwest::Client)>>,
}

impl ReqwestTransport {
    fn new(client: reqwest::Client, timeout: Option<Duration>) -> Self {
        Self {
            client,
            timeout,
            proxied: Mutex::new(None),
        }
    }

    fn client_builder(timeout: Option<Duration>) -> reqwest::ClientBuilder {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    /// reqwest binds proxies to a client, so proxied requests use a second client that is
    /// rebuilt whenever the proxy URL changes.
    fn client_for(&self, proxy: Option<&str>) -> Result<reqwest::Client, BoxError> {
        let Some(proxy) = proxy else {
            return Ok(self.client.clone());
        };

        let mut cached = self
            .proxied
            .lock()
            .map_err(|_| "proxied client cache lock poisoned")?;
        if let Some((url, client)) = cached.as_ref() {
            if url == proxy {
                return Ok(client.clone());
            }
        }

        let client = Self::client_builder(self.timeout)
            .proxy(reqwest::Proxy::all(proxy)?)
            .build()?;
        *cached = Some((proxy.to_owned(), client.clone()));
        Ok(client)
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let client = self.client_for(request.proxy.as_deref())?;
            let mut builder = match request.method {
                Method::Get => client.get(&request.url),
                Method::Post => client.post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`NotifyClient`].
///
/// Option and validation errors are raised before any request is sent. Everything the
/// service or the network reports is passed through without retries.
pub enum NotifyError {
    /// Options outside the operation's closed set, or with values of the wrong shape.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request token could not be built.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Client configuration is incomplete (e.g. a required environment variable is missing).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// HTTP client / transport failure (DNS, TLS, proxy, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status with a Notify error document.
    #[error("API error (HTTP {status}): {}", describe_errors(.errors))]
    Api {
        status: u16,
        errors: Vec<ApiErrorDetail>,
    },

    /// Non-successful HTTP status without a recognisable error document.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Successful response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),
}

fn describe_errors(errors: &[ApiErrorDetail]) -> String {
    errors
        .iter()
        .map(|detail| format!("{}: {}", detail.error, detail.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn parse_error(err: transport::TransportError) -> NotifyError {
    NotifyError::Parse(Box::new(err))
}

fn normalize_url(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
        field,
        input: trimmed.to_owned(),
    })?;
    Ok(trimmed.trim_end_matches('/').to_owned())
}

fn default_user_agent() -> String {
    format!("{USER_AGENT_PREFIX}/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone)]
/// Builder for [`NotifyClient`].
///
/// Use this when you need to customize the base URL, proxy, timeout, user-agent or clock.
pub struct NotifyClientBuilder {
    credentials: Credentials,
    base_url: String,
    proxy: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    clock: Arc<dyn Clock>,
}

impl NotifyClientBuilder {
    /// Create a builder from a composite API key, with the production base URL.
    pub fn new(api_key: impl AsRef<str>) -> Self {
        Self {
            credentials: Credentials::from_api_key(api_key.as_ref()),
            base_url: DEFAULT_BASE_URL.to_owned(),
            proxy: None,
            timeout: None,
            user_agent: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Configure from `NOTIFY_API_KEY` (required), `NOTIFY_BASE_URL` and `NOTIFY_PROXY_URL`.
    pub fn from_env() -> Result<Self, NotifyError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NotifyError> {
        let api_key = lookup(API_KEY_ENV).ok_or_else(|| {
            NotifyError::Configuration(format!("{API_KEY_ENV} environment variable is required"))
        })?;

        let mut builder = Self::new(api_key);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            builder = builder.base_url(base_url);
        }
        if let Some(proxy) = lookup(PROXY_URL_ENV).filter(|value| !value.trim().is_empty()) {
            builder = builder.proxy(proxy);
        }
        Ok(builder)
    }

    /// Override the API base URL (e.g. a staging host).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Route every request through this proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
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

    /// Replace the clock used for the token `iat` claim.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Build a [`NotifyClient`].
    pub fn build(self) -> Result<NotifyClient, NotifyError> {
        let base_url = normalize_url("base_url", &self.base_url)?;
        let proxy = self
            .proxy
            .map(|proxy| normalize_proxy(&proxy))
            .transpose()?;

        let client = ReqwestTransport::client_builder(self.timeout)
            .build()
            .map_err(|err| NotifyError::Transport(Box::new(err)))?;

        Ok(NotifyClient {
            signer: TokenSigner::new(self.credentials, self.clock),
            base_url,
            proxy,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            http: Arc::new(ReqwestTransport::new(client, self.timeout)),
        })
    }
}

fn normalize_proxy(proxy: &str) -> Result<String, ValidationError> {
    let trimmed = proxy.trim();
    url::Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
        field: "proxy",
        input: trimmed.to_owned(),
    })?;
    Ok(trimmed.to_owned())
}

#[derive(Clone)]
/// High-level Notify client.
///
/// Built from one composite API key, which is split into issuer id and secret once. Every
/// call signs a fresh token, builds the request and sends it through the configured
/// transport. Calls never retry; network and service failures surface as [`NotifyError`].
pub struct NotifyClient {
    signer: TokenSigner,
    base_url: String,
    proxy: Option<String>,
    user_agent: String,
    http: Arc<dyn HttpTransport>,
}

impl NotifyClient {
    /// Create a client for the production API.
    ///
    /// For more customization, use [`NotifyClient::builder`].
    pub fn new(api_key: impl AsRef<str>) -> Self {
        Self {
            signer: TokenSigner::new(
                Credentials::from_api_key(api_key.as_ref()),
                Arc::new(SystemClock),
            ),
            base_url: DEFAULT_BASE_URL.to_owned(),
            proxy: None,
            user_agent: default_user_agent(),
            http: Arc::new(ReqwestTransport::new(reqwest::Client::new(), None)),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: impl AsRef<str>) -> NotifyClientBuilder {
        NotifyClientBuilder::new(api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Route all subsequent requests from this client through `url`.
    pub fn set_proxy(&mut self, url: impl AsRef<str>) -> Result<(), NotifyError> {
        self.proxy = Some(normalize_proxy(url.as_ref())?);
        Ok(())
    }

    /// Send an email notification.
    ///
    /// Errors:
    /// - [`NotifyError::Api`] / [`NotifyError::HttpStatus`] for non-2xx responses,
    /// - [`NotifyError::Transport`] when the request could not be sent.
    pub async fn send_email(&self, request: SendEmail) -> Result<SendEmailResponse, NotifyError> {
        let body = self.execute(transport::encode_send_email(&request)).await?;
        transport::decode_send_email_json_response(&body).map_err(parse_error)
    }

    /// Send an email with options given as a loosely-typed JSON object
    /// (`personalisation`, `reference`, `emailReplyToId`, `statusCallbackUrl`,
    /// `statusCallbackBearerToken`).
    ///
    /// Unknown keys fail with [`NotifyError::Options`] before anything is sent.
    pub async fn send_email_with_options(
        &self,
        template_id: TemplateId,
        email_address: EmailAddress,
        options: serde_json::Value,
    ) -> Result<SendEmailResponse, NotifyError> {
        let options = EmailOptions::from_json(options)?;
        self.send_email(SendEmail::new(template_id, email_address, options))
            .await
    }

    /// Send an SMS notification.
    pub async fn send_sms(&self, request: SendSms) -> Result<SendSmsResponse, NotifyError> {
        let body = self.execute(transport::encode_send_sms(&request)).await?;
        transport::decode_send_sms_json_response(&body).map_err(parse_error)
    }

    /// Send an SMS with options given as a loosely-typed JSON object
    /// (`personalisation`, `reference`, `smsSenderId`, `statusCallbackUrl`,
    /// `statusCallbackBearerToken`).
    ///
    /// Unknown keys fail with [`NotifyError::Options`] before anything is sent.
    pub async fn send_sms_with_options(
        &self,
        template_id: TemplateId,
        phone_number: RawPhoneNumber,
        options: serde_json::Value,
    ) -> Result<SendSmsResponse, NotifyError> {
        let options = SmsOptions::from_json(options)?;
        self.send_sms(SendSms::new(template_id, phone_number, options))
            .await
    }

    /// Look up one notification and its delivery status.
    pub async fn get_notification(&self, id: &NotificationId) -> Result<Notification, NotifyError> {
        let body = self.execute(transport::encode_get_notification(id)).await?;
        transport::decode_notification_json_response(&body).map_err(parse_error)
    }

    /// List notifications, newest first, optionally filtered.
    pub async fn list_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> Result<NotificationList, NotifyError> {
        let body = self
            .execute(transport::encode_list_notifications(filter))
            .await?;
        transport::decode_notification_list_json_response(&body).map_err(parse_error)
    }

    /// Fetch the latest version of a template.
    pub async fn get_template(&self, id: &TemplateId) -> Result<Template, NotifyError> {
        let body = self.execute(transport::encode_get_template(id)).await?;
        transport::decode_template_json_response(&body).map_err(parse_error)
    }

    /// Fetch a specific version of a template.
    pub async fn get_template_version(
        &self,
        id: &TemplateId,
        version: TemplateVersion,
    ) -> Result<Template, NotifyError> {
        let body = self
            .execute(transport::encode_get_template_version(id, version))
            .await?;
        transport::decode_template_json_response(&body).map_err(parse_error)
    }

    /// List the service's templates, optionally only those of one type.
    pub async fn list_templates(
        &self,
        template_type: Option<TemplateType>,
    ) -> Result<TemplateList, NotifyError> {
        let body = self
            .execute(transport::encode_list_templates(template_type))
            .await?;
        transport::decode_template_list_json_response(&body).map_err(parse_error)
    }

    /// Render a template with the given personalisation without sending anything.
    pub async fn preview_template(
        &self,
        request: PreviewTemplate,
    ) -> Result<TemplatePreview, NotifyError> {
        let body = self
            .execute(transport::encode_preview_template(&request))
            .await?;
        transport::decode_template_preview_json_response(&body).map_err(parse_error)
    }

    /// Fetch up to one page of inbound text messages, newest first.
    pub async fn list_received_texts(
        &self,
        filter: &ReceivedTextFilter,
    ) -> Result<ReceivedTextList, NotifyError> {
        let body = self
            .execute(transport::encode_list_received_texts(filter))
            .await?;
        transport::decode_received_text_list_json_response(&body).map_err(parse_error)
    }

    fn bind(&self, request: &ApiRequest) -> Result<HttpRequest, NotifyError> {
        let headers = vec![
            (
                "Authorization".to_owned(),
                self.signer.authorization_header()?,
            ),
            ("User-Agent".to_owned(), self.user_agent.clone()),
        ];

        Ok(HttpRequest {
            method: request.method,
            url: format!("{}{}", self.base_url, request.path_and_query()),
            headers,
            body: request.body.clone(),
            proxy: self.proxy.clone(),
        })
    }

    async fn execute(&self, request: ApiRequest) -> Result<String, NotifyError> {
        let http_request = self.bind(&request)?;
        tracing::debug!(
            method = request.method.as_str(),
            path = %request.path_and_query(),
            proxied = http_request.proxy.is_some(),
            "sending Notify request"
        );

        let response = self
            .http
            .execute(http_request)
            .await
            .map_err(NotifyError::Transport)?;

        tracing::debug!(
            status = response.status,
            path = %request.path,
            "received Notify response"
        );

        if !(200..=299).contains(&response.status) {
            if let Some(errors) = transport::decode_error_json_response(&response.body) {
                return Err(NotifyError::Api {
                    status: response.status,
                    errors,
                });
            }
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(NotifyError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}
