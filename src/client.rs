//! Mini Sentry client implementation.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use url::Url;

use crate::error::{MiniSentryError, Result};
use crate::types::{Event, Session};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const PLACEHOLDER_TOKEN: &str = "PASTE_INGEST_TOKEN";
const ENV_BASE_URL: &str = "MS_BASE";
const ENV_TOKEN: &str = "MS_TOKEN";

/// Connection parameters for an ingestion endpoint.
///
/// Resolved once, held read-only for the life of the client. The ingest
/// token is an opaque per-project credential embedded in the request path.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    base_url: String,
    ingest_token: String,
}

impl EndpointConfig {
    /// Create a config from explicit values.
    ///
    /// Trailing slashes on `base_url` are trimmed so joined request URLs
    /// never contain a double slash.
    pub fn new(base_url: impl Into<String>, ingest_token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ingest_token: ingest_token.into(),
        }
    }

    /// Resolve the config from the `MS_BASE` and `MS_TOKEN` environment
    /// variables.
    ///
    /// Unset variables fall back to `http://localhost:8000` and a
    /// placeholder token. The placeholder is only usable against a demo
    /// server; real use requires a project's ingest token.
    pub fn from_env() -> Self {
        let base_url = env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let ingest_token = env::var(ENV_TOKEN).unwrap_or_else(|_| PLACEHOLDER_TOKEN.to_string());
        Self::new(base_url, ingest_token)
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured ingest token.
    pub fn ingest_token(&self) -> &str {
        &self.ingest_token
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, PLACEHOLDER_TOKEN)
    }
}

/// Builder for creating a MiniSentry client with custom options.
#[derive(Debug, Clone)]
pub struct MiniSentryBuilder {
    config: EndpointConfig,
    timeout: Duration,
    release: String,
    environment: String,
    app: String,
}

impl MiniSentryBuilder {
    /// Create a new builder with the given ingest token.
    pub fn new(ingest_token: impl Into<String>) -> Self {
        Self {
            config: EndpointConfig::new(DEFAULT_BASE_URL, ingest_token),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            release: String::new(),
            environment: String::new(),
            app: String::new(),
        }
    }

    /// Set the base URL of the ingestion server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = EndpointConfig::new(base_url, self.config.ingest_token);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the release version applied by the capture helpers.
    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = release.into();
        self
    }

    /// Set the environment label applied by the capture helpers.
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Set the application name applied by the capture helpers.
    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.app = app.into();
        self
    }

    /// Build the MiniSentry client.
    pub fn build(self) -> Result<MiniSentry> {
        // Reject unparseable base URLs here rather than on first send.
        Url::parse(self.config.base_url())?;

        let http_client = HttpClient::builder().timeout(self.timeout).build()?;

        Ok(MiniSentry {
            inner: Arc::new(MiniSentryInner {
                config: self.config,
                release: self.release,
                environment: self.environment,
                app: self.app,
                http_client,
            }),
        })
    }
}

/// Internal shared state for the client.
struct MiniSentryInner {
    config: EndpointConfig,
    release: String,
    environment: String,
    app: String,
    http_client: HttpClient,
}

impl MiniSentryInner {
    fn events_url(&self) -> String {
        format!(
            "{}/api/events/ingest/token/{}/",
            self.config.base_url, self.config.ingest_token
        )
    }

    fn sessions_url(&self) -> String {
        format!(
            "{}/api/sessions/ingest/token/{}/",
            self.config.base_url, self.config.ingest_token
        )
    }
}

/// The Mini Sentry client.
///
/// Cheap to clone; all clones share one HTTP connection pool. Every send is
/// a single best-effort POST with no retry; the caller decides whether a
/// failure is worth logging or retrying.
///
/// # Example
///
/// ```no_run
/// use minisentry::{Event, MiniSentry};
///
/// #[tokio::main]
/// async fn main() -> minisentry::Result<()> {
///     let client = MiniSentry::from_env()?;
///
///     let event = Event::new("Hello from Rust", "info")
///         .release("1.0.0")
///         .environment("development")
///         .app("rust-example");
///     client.send(&event).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct MiniSentry {
    inner: Arc<MiniSentryInner>,
}

impl MiniSentry {
    /// Create a client from the `MS_BASE` and `MS_TOKEN` environment
    /// variables, with built-in defaults for whichever is unset.
    pub fn from_env() -> Result<Self> {
        Self::new(EndpointConfig::from_env())
    }

    /// Create a client from an explicit endpoint config, with the default
    /// timeout.
    pub fn new(config: EndpointConfig) -> Result<Self> {
        MiniSentryBuilder::new(config.ingest_token)
            .base_url(config.base_url)
            .build()
    }

    /// Create a new builder with the given ingest token.
    pub fn builder(ingest_token: impl Into<String>) -> MiniSentryBuilder {
        MiniSentryBuilder::new(ingest_token)
    }

    /// The endpoint config this client was built with.
    pub fn config(&self) -> &EndpointConfig {
        &self.inner.config
    }

    /// Send an event to the ingestion endpoint.
    ///
    /// Issues exactly one `POST {base_url}/api/events/ingest/token/{token}/`
    /// with the event serialized as the JSON body. The event is sent as
    /// constructed; client-level defaults are not merged in.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use minisentry::{Event, MiniSentry};
    /// # async fn example() -> minisentry::Result<()> {
    /// let client = MiniSentry::from_env()?;
    /// client.send(&Event::new("cache miss storm", "warning")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send(&self, event: &Event) -> Result<()> {
        let url = self.inner.events_url();
        let response = self.inner.http_client.post(&url).json(event).send().await?;
        Self::check_status(response).await
    }

    /// Send a release-health session report.
    ///
    /// Issues one `POST {base_url}/api/sessions/ingest/token/{token}/`.
    pub async fn send_session(&self, session: &Session) -> Result<()> {
        let url = self.inner.sessions_url();
        let response = self
            .inner
            .http_client
            .post(&url)
            .json(session)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Build an event from a message plus the client-level
    /// release/environment/app defaults, and send it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use minisentry::MiniSentry;
    /// # async fn example() -> minisentry::Result<()> {
    /// let client = MiniSentry::builder("abc123")
    ///     .release("1.0.0")
    ///     .app("worker")
    ///     .build()?;
    /// client.capture_message("queue drained", "info").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn capture_message(&self, message: &str, level: &str) -> Result<()> {
        self.send(&self.event_with_defaults(message, level)).await
    }

    /// Report an error value at level "error".
    ///
    /// The error's `Display` output becomes the message, and the full
    /// source chain is rendered into the event's stack text.
    pub async fn capture_error(&self, err: &dyn std::error::Error) -> Result<()> {
        let mut stack = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\ncaused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        let event = self.event_with_defaults(&err.to_string(), "error").stack(stack);
        self.send(&event).await
    }

    fn event_with_defaults(&self, message: &str, level: &str) -> Event {
        Event::new(message, level)
            .release(self.inner.release.clone())
            .environment(self.inner.environment.clone())
            .app(self.inner.app.clone())
    }

    async fn check_status(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => MiniSentryError::auth(message),
                429 => MiniSentryError::rate_limited(message),
                code => MiniSentryError::api(code, message),
            });
        }
        Ok(())
    }
}
