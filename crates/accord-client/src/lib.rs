//! # Accord Client
//!
//! Turns endpoint instances into HTTP requests and responses back into typed
//! values.
//!
//! - [`build_request`] / [`endpoint_url`] - Pure request construction
//! - [`Transport`] - The async seam that actually sends requests
//! - [`ReqwestTransport`] - Production transport over `reqwest`
//! - [`Client`] - Ties a base URL and a transport together
//!
//! ## Example
//!
//! ```rust
//! use accord_client::build_request;
//! use accord_core::fixtures::AddUser;
//! use accord_core::Descriptor;
//! use http::Uri;
//!
//! let descriptor = Descriptor::<AddUser>::resolve().unwrap();
//! let request = build_request(
//!     &descriptor,
//!     &AddUser { name: "Stuart".to_string() },
//!     &Uri::from_static("http://ravana.local/"),
//! )
//! .unwrap();
//!
//! assert_eq!(request.method(), http::Method::POST);
//! assert_eq!(request.uri(), "http://ravana.local/user");
//! ```

#![doc(html_root_url = "https://docs.rs/accord-client/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
mod descriptors;
mod error;
mod request;
mod transport;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{BoxError, ClientError, TransportError};
pub use request::{build_request, endpoint_url};
pub use transport::{ReqwestTransport, Transport};
