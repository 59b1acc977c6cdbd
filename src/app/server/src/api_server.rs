// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;

use axum::Json;
use axum::extract::Extension;
use dill::Catalog;
use internal_error::{InternalError, ResultIntoInternal};
use utoipa_axum::router::OpenApiRouter;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

type ServerFuture = Pin<Box<dyn Future<Output = Result<(), std::io::Error>> + Send>>;

pub struct ApiServer {
    server_future: ServerFuture,
    local_addr: SocketAddr,
}

impl ApiServer {
    pub fn new(catalog: Catalog, listener: tokio::net::TcpListener) -> Result<Self, InternalError> {
        let router = build_router(catalog);
        let local_addr = listener.local_addr().int_err()?;

        let server_future = Box::pin(
            axum::serve(listener, router.into_make_service())
                .with_graceful_shutdown(shutdown_signal())
                .into_future(),
        );

        Ok(Self {
            server_future,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub async fn run(self) -> Result<(), InternalError> {
        self.server_future.await.int_err()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// API routes plus `/openapi.json`, wrapped in the server-wide layers
pub fn build_router(catalog: Catalog) -> axum::Router {
    let (router, mut api) = OpenApiRouter::new()
        .merge(cryptotrade_adapter_http::root_router())
        .split_for_parts();

    api.info.title = "CryptoTrade.gg".to_string();
    api.info.version = env!("CARGO_PKG_VERSION").to_string();

    router
        .route(
            "/openapi.json",
            axum::routing::get(move || async move { Json(api) }),
        )
        .layer(
            tower::ServiceBuilder::new()
                .layer(tower_http::catch_panic::CatchPanicLayer::new())
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(
                    tower_http::cors::CorsLayer::new()
                        .allow_origin(tower_http::cors::Any)
                        .allow_methods(vec![
                            http::Method::GET,
                            http::Method::POST,
                            http::Method::PUT,
                            http::Method::DELETE,
                        ])
                        .allow_headers(tower_http::cors::Any),
                )
                .layer(Extension(catalog)),
        )
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections"),
        Err(err) => {
            tracing::error!(error = ?err, "Unable to listen for the shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
