// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts_inmem::InMemoryAccountRepository;
use cryptotrade_auth_web3_inmem::InMemoryWeb3AuthNonceRepository;
use dill::{Catalog, CatalogBuilder};
use time_source::SystemTimeSourceDefault;

use crate::logging::configure_logging;
use crate::{Cli, Command, ResolvedServerConfig, ServerError, commands};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(cli: Cli) -> Result<(), ServerError> {
    configure_logging(cli.verbose);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Initializing");

    match cli.command {
        Command::Run(args) => commands::run_server(args).await,
        Command::SignMessage(args) => commands::sign_message(args).await,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn build_catalog(config: ResolvedServerConfig) -> Catalog {
    let mut b = CatalogBuilder::new();
    configure_base_catalog(&mut b, config);
    b.build()
}

pub fn configure_base_catalog(b: &mut CatalogBuilder, config: ResolvedServerConfig) {
    b.add::<SystemTimeSourceDefault>();

    // Storage
    b.add::<InMemoryAccountRepository>();
    b.add::<InMemoryWeb3AuthNonceRepository>();

    b.add_value(config.web3_auth);
    b.add_value(config.session);
    b.add_value(config.session_cookie);
    b.add_value(config.wallet_accounts);

    cryptotrade_accounts_services::register_dependencies(b);
    cryptotrade_auth_web3_services::register_dependencies(b);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
