// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use internal_error::ResultIntoInternal;

use crate::{ApiServer, RunArgs, ServerConfig, ServerError, build_catalog};

pub const DEFAULT_HTTP_PORT: u16 = 8080;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run_server(args: RunArgs) -> Result<(), ServerError> {
    let config = ServerConfig::load(args.config.as_deref())?;
    let catalog = build_catalog(config.resolve_from_env()?);

    init_on_startup::run_startup_jobs(&catalog).await.int_err()?;

    let address = SocketAddr::new(
        args.address.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        args.port.unwrap_or(DEFAULT_HTTP_PORT),
    );
    let listener = tokio::net::TcpListener::bind(address).await.int_err()?;

    let api_server = ApiServer::new(catalog, listener)?;

    tracing::info!(address = %api_server.local_addr(), "HTTP API server is listening");
    eprintln!(
        "HTTP API server is listening on: http://{}",
        api_server.local_addr()
    );

    api_server.run().await?;

    tracing::info!("HTTP API server stopped");
    Ok(())
}
