//! # minisentry
//!
//! Rust client for Mini Sentry - a minimal error tracking and release
//! health service. Events and sessions are reported over HTTP to
//! token-addressed ingestion endpoints.
//!
//! ## Quick Start
//!
//! ```no_run
//! use minisentry::{Event, MiniSentry};
//!
//! #[tokio::main]
//! async fn main() -> minisentry::Result<()> {
//!     // Create client from environment (MS_BASE, MS_TOKEN)
//!     let client = MiniSentry::from_env()?;
//!
//!     // Report a single event
//!     let event = Event::new("Hello from Rust", "info")
//!         .release("1.0.0")
//!         .environment("development")
//!         .app("rust-example");
//!     client.send(&event).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! The client can be configured using environment variables or the builder
//! pattern:
//!
//! ```no_run
//! use minisentry::MiniSentry;
//! use std::time::Duration;
//!
//! // From environment (MS_BASE, MS_TOKEN)
//! let client = MiniSentry::from_env()?;
//!
//! // Using builder
//! let client = MiniSentry::builder("your_ingest_token")
//!     .base_url("http://localhost:8000")
//!     .timeout(Duration::from_secs(5))
//!     .release("1.0.0")
//!     .environment("production")
//!     .app("my-app")
//!     .build()?;
//! # Ok::<(), minisentry::MiniSentryError>(())
//! ```
//!
//! ## Capture helpers
//!
//! The capture helpers build the event for you, applying the client-level
//! release/environment/app defaults:
//!
//! ```no_run
//! use minisentry::MiniSentry;
//!
//! # async fn example() -> minisentry::Result<()> {
//! let client = MiniSentry::from_env()?;
//!
//! client.capture_message("reindex finished", "info").await?;
//!
//! let err = std::fs::read_to_string("missing.toml").unwrap_err();
//! client.capture_error(&err).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Delivery semantics
//!
//! Every send is a single POST with no retry and no local queue. A `2xx`
//! response is success; anything else surfaces as a typed error and the
//! caller decides what to do with it. Requests share one connection pool
//! and a bounded timeout (10 seconds by default).

mod client;
mod error;
mod types;

pub use client::{EndpointConfig, MiniSentry, MiniSentryBuilder};
pub use error::{MiniSentryError, Result};
pub use types::{Event, Frame, Session};
