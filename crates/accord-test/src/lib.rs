//! # Accord Test
//!
//! Testing helpers that need no network:
//!
//! - [`TestClient`] - Raw HTTP requests dispatched straight into [`Routes`]
//! - [`InMemoryTransport`] - A [`Transport`] for the client binder that
//!   answers from [`Routes`], for client/server agreement tests
//!
//! [`Routes`]: accord_server::Routes
//! [`Transport`]: accord_client::Transport

#![doc(html_root_url = "https://docs.rs/accord-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod response;
mod transport;

pub use client::{TestClient, TestRequest};
pub use error::TestError;
pub use response::TestResponse;
pub use transport::{InMemoryTransport, IN_MEMORY_BASE_URL};
