//! # Accord
//!
//! Declare an HTTP endpoint once, as a type, and get both ends of it:
//!
//! - the **client binder** builds the request from an instance and decodes
//!   the response ([`client`]);
//! - the **server binder** registers a handler for the same type and
//!   rebuilds the instance from each inbound request ([`server`]).
//!
//! The method, path, query, body and response shape all come from the one
//! [`Endpoint`](prelude::Endpoint) implementation, so the two sides cannot
//! drift apart.
//!
//! ```rust
//! use accord::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Order {
//!     id: u64,
//! }
//!
//! /// `GET /order/{id}`
//! #[derive(Debug, Default)]
//! struct GetOrder {
//!     id: u64,
//! }
//!
//! impl Endpoint for GetOrder {
//!     type Query = NoBody;
//!     type Body = NoBody;
//!     type Response = Order;
//!
//!     fn path() -> PathTemplate<Self> {
//!         PathTemplate::<Self>::new().literal("order").param("id", |e| &e.id, |e, v| e.id = v)
//!     }
//!     fn query(&self) -> NoBody { NoBody }
//!     fn set_query(&mut self, _: NoBody) {}
//!     fn body(&self) -> NoBody { NoBody }
//!     fn set_body(&mut self, _: NoBody) {}
//! }
//!
//! // Server side.
//! let routes = Routes::new()
//!     .endpoint(|req: GetOrder| async move { Ok::<_, std::convert::Infallible>(Order { id: req.id }) })
//!     .unwrap();
//! assert_eq!(routes.len(), 1);
//!
//! // Client side.
//! let descriptor = Descriptor::<GetOrder>::resolve().unwrap();
//! let base = "http://shop.local/".parse().unwrap();
//! let request = build_request(&descriptor, &GetOrder { id: 7 }, &base).unwrap();
//! assert_eq!(request.uri(), "http://shop.local/order/7");
//! ```

#![doc(html_root_url = "https://docs.rs/accord/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Descriptor model
pub use accord_core as core;

// Router primitive
pub use accord_router as router;

// Client binder
pub use accord_client as client;

// Server binder
pub use accord_server as server;

// Logging setup
pub use accord_telemetry as telemetry;

// Layered configuration
pub use accord_config as config;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use accord_core::{
        Descriptor, DescriptorError, Endpoint, Method, NoBody, PathError, PathTemplate, PathValue,
        Role, JSON_CONTENT_TYPE,
    };

    pub use accord_client::{build_request, endpoint_url, Client, ClientConfig, ClientError};

    pub use accord_server::{InboundRequest, MalformedRequest, Routes, Server, ServerConfig};

    pub use accord_config::{AccordConfig, ConfigLoader};

    pub use accord_telemetry::{init_logging, LogConfig};
}
