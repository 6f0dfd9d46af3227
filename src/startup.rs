use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderName, Method, header},
    response::Response,
    routing::{get, post},
    serve::Serve,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Span, info, info_span};
use uuid::Uuid;

use crate::{
    configuration::Settings,
    domain::EmailAddress,
    email_client::EmailClient,
    routes::{health_check, send_emails},
};

/// Form submissions are a few kilobytes at most.
pub const MAX_SUBMISSION_BYTES: usize = 64 * 1024;

pub struct WebsiteUrl(pub String);

pub struct AppState {
    pub email_client: EmailClient,
    pub internal_recipient: EmailAddress,
    pub website_url: WebsiteUrl,
}

/// Headers the website's backend client attaches to every call.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

pub async fn run(
    listener: TcpListener,
    email_client: EmailClient,
    internal_recipient: EmailAddress,
    website_url: String,
) -> anyhow::Result<Serve<TcpListener, Router, Router>> {
    // Shared behind an Arc so handlers clone a pointer, not the http client.
    let app_state = Arc::new(AppState {
        email_client,
        internal_recipient,
        website_url: WebsiteUrl(website_url),
    });
    let app = Router::new()
        .route("/health_check", get(health_check))
        .route("/send-emails", post(send_emails))
        .layer(DefaultBodyLimit::max(MAX_SUBMISSION_BYTES))
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = Uuid::new_v4();
                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        request_id = ?request_id,
                        status = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    let status = response.status();
                    span.record("status", status.as_u16());
                    info!(parent: span, ?status, ?latency, "Response sent");
                }),
        )
        // outermost, so pre-flight is answered before routing and errors carry the headers too
        .layer(cors_layer());

    Ok(axum::serve(listener, app))
}

pub struct Application {
    port: u16,
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let sender_email = configuration
            .email_client
            .sender()
            .map_err(anyhow::Error::msg)?;
        let timeout = configuration.email_client.timeout();
        let email_client = EmailClient::new(
            sender_email,
            configuration.email_client.sender_name,
            configuration.email_client.base_url,
            configuration.email_client.authorization_token,
            timeout,
        )?;
        let internal_recipient = configuration
            .notification
            .internal_recipient()
            .map_err(anyhow::Error::msg)?;

        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        ))
        .await?;
        let port = listener.local_addr()?.port();

        let server = run(
            listener,
            email_client,
            internal_recipient,
            configuration.notification.website_url,
        )
        .await?;

        Ok(Self { server, port })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        Ok(self.server.await?)
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
