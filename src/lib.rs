//! Rust client for the [Heap](https://heap.io) server-side tracking API.
//!
//! # Overview
//!
//! The crate revolves around a [`HeapClient`] bound to one Heap application ID. The client offers
//! two operations:
//!
//! - [`HeapClient::track`] sends a [`TrackEvent`] to `POST /track`.
//! - [`HeapClient::add_user_properties`] attaches [`UserProperties`] to an identity via
//!   `POST /add_user_properties`.
//!
//! Each call issues exactly one HTTP request. There is no batching, no queueing and no retry:
//! callers that need a retry policy should build it on top of the returned [`Result`].
//!
//! # Error Handling
//!
//! Errors are represented by the [`Error`] enum. Failures are reported to the configured
//! [`Logger`] before they are returned, and are returned to the caller as-is.
//!
//! # Logging
//!
//! By default, failures are reported through the [`log`](https://docs.rs/log/latest/log/) crate
//! (see [`DefaultLogger`]). A custom [`Logger`] can be supplied through
//! [`ClientConfig::logger`].
//!
//! # Examples
//!
//! ```no_run
//! # async fn run() -> heap::Result<()> {
//! use heap::{ClientConfig, TrackEvent};
//!
//! let client = ClientConfig::from_app_id("1234567890").to_client()?;
//! client
//!     .track(&TrackEvent::new("signup").identity("user@example.com").property("plan", "pro"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod events;
mod logger;
mod response;

pub use client::HeapClient;
pub use config::ClientConfig;
pub use error::{Error, Result, TransportError};
pub use events::{Properties, TrackEvent, UserProperties};
pub use logger::{DefaultLogger, Logger};
pub use response::{ErrorBody, ErrorResponse, Response, SuccessResponse};
