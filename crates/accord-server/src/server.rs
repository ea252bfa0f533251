//! HTTP server over hyper.
//!
//! One task per connection, HTTP/1.1 via `hyper::server::conn::http1`.
//! Each request body is buffered (bounded by `max_body_bytes`), dispatched
//! through [`Routes::respond`], which answers handler errors with a `500`
//! envelope.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::{Request, Response, StatusCode};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::config::ServerConfig;
use crate::error::{error_response, ServerError};
use crate::routes::Routes;

/// Response type written to connections.
pub type HttpResponse = Response<Full<Bytes>>;

/// Serves [`Routes`] over HTTP/1.1.
///
/// ```rust,no_run
/// use accord_server::{Routes, Server, ServerConfig};
///
/// # async fn run() -> Result<(), accord_server::ServerError> {
/// let server = Server::new(Routes::new(), ServerConfig::default());
/// server.run(async { let _ = tokio::signal::ctrl_c().await; }).await
/// # }
/// ```
pub struct Server {
    routes: Arc<Routes>,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Creates a server for `routes`.
    #[must_use]
    pub fn new(routes: Routes, config: ServerConfig) -> Self {
        Self {
            routes: Arc::new(routes),
            config: Arc::new(config),
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The served routes.
    #[must_use]
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Binds `http_addr` and serves until `shutdown` completes.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve(listener, shutdown).await
    }

    /// Serves connections from `listener` until `shutdown` completes.
    ///
    /// Open connections are then asked to finish their in-flight request
    /// and are given `shutdown_timeout_secs` to close.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let local_addr = listener.local_addr()?;
        for route in self.routes.iter() {
            tracing::info!(
                endpoint = route.endpoint,
                http.method = %route.method,
                http.path = %route.pattern,
                "route registered"
            );
        }
        tracing::info!(addr = %local_addr, routes = self.routes.len(), "server listening");

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, remote_addr)) => {
                        let routes = Arc::clone(&self.routes);
                        let config = Arc::clone(&self.config);
                        let stop = stop_rx.clone();
                        connections.spawn(async move {
                            if let Err(e) = serve_connection(stream, routes, config, stop).await {
                                tracing::debug!(remote = %remote_addr, error = %e, "connection error");
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to accept connection");
                    }
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
                () = &mut shutdown => {
                    tracing::info!("shutdown requested, no longer accepting connections");
                    break;
                }
            }
        }

        drop(listener);
        // Receivers may all be gone already; nothing to notify then.
        let _ = stop_tx.send(true);

        let timeout = self.config.shutdown_timeout();
        let drained = tokio::time::timeout(timeout, async {
            while connections.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            tracing::warn!(
                remaining = connections.len(),
                "shutdown timeout reached, aborting open connections"
            );
            connections.shutdown().await;
        }

        tracing::info!("server stopped");
        Ok(())
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .finish()
    }
}

async fn serve_connection(
    stream: TcpStream,
    routes: Arc<Routes>,
    config: Arc<ServerConfig>,
    mut stop: watch::Receiver<bool>,
) -> Result<(), hyper::Error> {
    let service = service_fn(move |request: Request<Incoming>| {
        let routes = Arc::clone(&routes);
        let config = Arc::clone(&config);
        async move { Ok::<_, Infallible>(handle(&routes, &config, request).await) }
    });

    let connection = http1::Builder::new().serve_connection(TokioIo::new(stream), service);
    tokio::pin!(connection);

    tokio::select! {
        result = connection.as_mut() => result,
        _ = stop.changed() => {
            connection.as_mut().graceful_shutdown();
            connection.await
        }
    }
}

/// Buffers, dispatches and answers one request.
async fn handle(
    routes: &Routes,
    config: &ServerConfig,
    request: Request<Incoming>,
) -> HttpResponse {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let timeout = config.request_timeout();

    let (parts, body) = request.into_parts();
    let limited = Limited::new(body, config.max_body_bytes);
    let collected = tokio::time::timeout(timeout, limited.collect()).await;

    let response = match collected {
        Err(_) => {
            tracing::warn!(http.method = %method, http.path = %path, "request body timed out");
            error_response(
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "request body was not received in time",
            )
        }
        Ok(Err(e)) if e.downcast_ref::<LengthLimitError>().is_some() => error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "PAYLOAD_TOO_LARGE",
            &format!("request body exceeds {} bytes", config.max_body_bytes),
        ),
        Ok(Err(e)) => {
            tracing::warn!(
                http.method = %method,
                http.path = %path,
                error = %e,
                "failed to read request body"
            );
            error_response(
                StatusCode::BAD_REQUEST,
                "BODY_READ_ERROR",
                "failed to read request body",
            )
        }
        Ok(Ok(body)) => {
            let request = Request::from_parts(parts, body.to_bytes());
            match tokio::time::timeout(timeout, routes.respond(request)).await {
                Ok(response) => response,
                Err(_) => {
                    tracing::warn!(http.method = %method, http.path = %path, "handler timed out");
                    error_response(
                        StatusCode::GATEWAY_TIMEOUT,
                        "HANDLER_TIMEOUT",
                        "the handler did not finish in time",
                    )
                }
            }
        }
    };

    tracing::debug!(
        http.method = %method,
        http.path = %path,
        http.status = response.status().as_u16(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "request completed"
    );
    response.map(Full::new)
}

/// Binds an ephemeral local port; for tests and embedding.
pub async fn bind_ephemeral() -> Result<(TcpListener, SocketAddr), ServerError> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}
