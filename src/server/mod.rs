use std::{
    future::Future,
    net::{IpAddr, SocketAddr},
    time::Duration,
};

use axum::{routing::get, Router};
use error_stack::{Report, ResultExt};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnFailure, DefaultOnRequest, TraceLayer};
use tracing::{Level, Span};

use crate::{
    error::Error,
    reply::EnvelopeError,
    request::RequestContext,
};

mod health;
mod items;

/// The server and related information
pub struct Server {
    /// The host the server is bound to
    pub host: String,
    /// The port the server is bound to
    pub port: u16,
    /// The server itself.
    pub app: Router<()>,
    /// The server's TCP listener
    pub listener: tokio::net::TcpListener,
}

impl Server {
    /// Run the server, and perform a graceful shutdown when receiving a ctrl+c (SIGINT or
    /// equivalent).
    pub async fn run(self) -> Result<(), Report<Error>> {
        self.run_with_shutdown_signal(shutdown_signal()).await
    }

    /// Run the server, and shut it down when `shutdown` resolves.
    pub async fn run_with_shutdown_signal(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), Report<Error>> {
        axum::serve(
            self.listener,
            self.app
                .into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .change_context(Error::ServerStart)?;

        Ok(())
    }
}

/// Resolves when the process receives ctrl+c.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutting down");
}

/// Create a TCP listener.
pub async fn create_tcp_listener(
    host: &str,
    port: u16,
) -> Result<tokio::net::TcpListener, Report<Error>> {
    let bind_ip = host
        .parse::<IpAddr>()
        .change_context(Error::ServerStart)
        .attach_printable_lazy(|| format!("Invalid host {host}"))?;
    let bind_addr = SocketAddr::from((bind_ip, port));
    tokio::net::TcpListener::bind(bind_addr)
        .await
        .change_context(Error::ServerStart)
        .attach_printable_lazy(|| format!("Binding to {bind_addr}"))
}

pub enum ServerBind {
    /// A host and port to bind to
    HostPort(String, u16),
    /// An existing TCP listener to use
    Listener(tokio::net::TcpListener),
}

pub struct Config {
    pub bind: ServerBind,
}

pub fn create_routes() -> Router<()> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .merge(items::create_routes())
        .fallback(not_found)
}

async fn not_found(request: RequestContext) -> EnvelopeError {
    let path = request.uri.path().to_string();
    EnvelopeError::new(
        request,
        http::StatusCode::NOT_FOUND,
        format!("no route for {path}"),
    )
}

/// Build the demo server and bind its listener.
pub async fn create_server(config: Config) -> Result<Server, Report<Error>> {
    let app = create_routes().layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|req: &axum::extract::Request| {
                        let method = req.method();
                        let uri = req.uri();

                        let route = req
                            .extensions()
                            .get::<axum::extract::MatchedPath>()
                            .map(|matched_path| matched_path.as_str());

                        tracing::info_span!("request",
                            http.method=%method,
                            http.uri=%uri,
                            http.route=route,
                            http.status_code = tracing::field::Empty,
                        )
                    })
                    .on_response(|res: &http::Response<_>, latency: Duration, span: &Span| {
                        let status = res.status();
                        span.record("http.status_code", status.as_u16());

                        tracing::info!(
                            latency = %format!("{} ms", latency.as_millis()),
                            http.status_code = status.as_u16(),
                            "finished processing request"
                        );
                    })
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
            )
            .into_inner(),
    );

    let listener = match config.bind {
        ServerBind::Listener(l) => l,
        ServerBind::HostPort(host, port) => create_tcp_listener(&host, port).await?,
    };

    let actual_addr = listener.local_addr().change_context(Error::ServerStart)?;
    let port = actual_addr.port();
    let host = actual_addr.ip().to_string();
    tracing::info!("Listening on {host}:{port}");

    Ok(Server {
        host,
        port,
        app,
        listener,
    })
}
