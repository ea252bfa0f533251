//! # Accord Server
//!
//! Binds endpoint types to handlers and serves them over HTTP.
//!
//! - [`Routes`] - Registers endpoints and dispatches buffered requests
//! - [`InboundRequest`] - The request view used to rebuild endpoint instances
//! - [`MalformedRequest`] - Decoding failures, answered with `400`
//! - [`Server`] - hyper HTTP/1.1 server with body limits, timeouts and
//!   graceful shutdown
//!
//! ## Example
//!
//! ```rust,no_run
//! use accord_core::fixtures::{GetUser, User};
//! use accord_server::{Routes, Server, ServerConfig};
//! use std::convert::Infallible;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let routes = Routes::new().endpoint(|req: GetUser| async move {
//!         Ok::<_, Infallible>(User::new(req.id, "Stuart"))
//!     })?;
//!
//!     Server::new(routes, ServerConfig::default())
//!         .run(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/accord-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod request;
mod routes;
mod server;

pub use config::{ServerConfig, DEFAULT_HTTP_ADDR, DEFAULT_MAX_BODY_BYTES};
pub use error::{BoxError, MalformedRequest, RegistrationError, RequestPart, ServerError};
pub use request::InboundRequest;
pub use routes::{BoxFuture, RouteInfo, Routes};
pub use server::{bind_ephemeral, HttpResponse, Server};
