//! API server initialization

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;

use tower_http::compression::CompressionLayer;

use super::embedded;
use super::middleware::{self, AllowedOrigins};
use super::routes::{
    events, giftcards, health, places, records, restaurants, reviews, travelpasses, users,
};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);

        Self {
            app,
            allowed_origins,
        }
    }

    /// Serve until shutdown is triggered. Returns CoreApp so the caller
    /// can drain background tasks and close the database.
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        // Clone shutdown before moving app
        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(host.parse()?, port);

        let ui_routes = Router::new().fallback(embedded::serve_assets);

        let database = app.database.clone();

        let router = Router::new()
            .route("/", get(|| async { Redirect::temporary("/ui") }))
            .route("/api/v1/health", get(health::health))
            .nest("/ui", ui_routes)
            .nest("/api/v1/places", places::routes(database.clone()))
            .nest("/api/v1/events", events::routes(database.clone()))
            .nest("/api/v1/restaurants", restaurants::routes(database.clone()))
            .nest("/api/v1/reviews", reviews::routes(database.clone()))
            .nest("/api/v1/giftcards", giftcards::routes(database.clone()))
            .nest(
                "/api/v1/travelpasses",
                travelpasses::routes(database.clone()),
            )
            .nest("/api/v1/users", users::routes(database.clone()))
            .nest("/api/v1/records", records::routes(database))
            .fallback(middleware::handle_404)
            .layer(CompressionLayer::new())
            .layer(middleware::cors(&allowed_origins))
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT));

        let listener = TcpListener::bind(addr).await?;
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}
