//! Wire types for the Mini Sentry ingestion API.

use serde::Serialize;
use uuid::Uuid;

/// A single occurrence reported to the server.
///
/// `message` and `level` are required and expected to be non-empty. The
/// server treats `level` as an open vocabulary ("info", "warning", "error",
/// ...) and normalizes unknown spellings itself, so no validation happens
/// client-side.
///
/// # Example
///
/// ```
/// use minisentry::Event;
///
/// let event = Event::new("checkout failed", "error")
///     .release("1.4.2")
///     .environment("production")
///     .app("storefront");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Free-text description of the occurrence.
    pub message: String,
    /// Severity label.
    pub level: String,
    /// Version of the emitting build. Empty when unknown.
    pub release: String,
    /// Deployment environment label. Empty when unknown.
    pub environment: String,
    /// Name of the emitting application. Empty when unknown.
    pub app: String,
    /// Raw stack trace text. The server parses and symbolicates it against
    /// uploaded sourcemaps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Pre-parsed stack frames, if the caller already has them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<Frame>>,
    /// Arbitrary structured context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
    /// Free-form labels stored on the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Event {
    /// Create an event with the required fields; everything else is unset.
    pub fn new(message: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: level.into(),
            release: String::new(),
            environment: String::new(),
            app: String::new(),
            stack: None,
            frames: None,
            extra: None,
            tags: None,
        }
    }

    /// Set the release version.
    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = release.into();
        self
    }

    /// Set the deployment environment.
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Set the emitting application name.
    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.app = app.into();
        self
    }

    /// Attach a raw stack trace.
    pub fn stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Attach pre-parsed stack frames.
    pub fn frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Attach arbitrary structured context.
    pub fn extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Attach tags.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// One stack frame, in the shape the server's symbolicator consumes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Frame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

/// A release-health session report.
///
/// Sessions track whether an application run ended cleanly ("ok"), with
/// handled errors ("errored"), or crashed ("crashed"). The status
/// vocabulary is open, like event levels.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Identifier for this session. Generated when not supplied.
    pub session_id: String,
    /// Session outcome ("init", "ok", "errored", "crashed").
    pub status: String,
    /// Version of the emitting build. Empty when unknown.
    pub release: String,
    /// Deployment environment label. Empty when unknown.
    pub environment: String,
    /// Opaque user identifier. Empty when unknown.
    pub user: String,
    /// Session duration in milliseconds.
    pub duration_ms: u64,
}

impl Session {
    /// Create a session with a generated id and the given status.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4().simple().to_string(),
            status: status.into(),
            release: String::new(),
            environment: String::new(),
            user: String::new(),
            duration_ms: 0,
        }
    }

    /// Override the generated session id.
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Set the release version.
    pub fn release(mut self, release: impl Into<String>) -> Self {
        self.release = release.into();
        self
    }

    /// Set the deployment environment.
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Set the user identifier.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Set the session duration.
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}
