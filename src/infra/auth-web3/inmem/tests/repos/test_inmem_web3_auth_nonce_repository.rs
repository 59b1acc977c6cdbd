// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_auth_web3_inmem::InMemoryWeb3AuthNonceRepository;
use dill::{Catalog, CatalogBuilder};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_missing_nonce_not_found() {
    let harness = InMemoryWeb3AuthNonceRepositoryHarness::new();
    cryptotrade_auth_web3_repo_tests::test_missing_nonce_not_found(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_and_get_nonce() {
    let harness = InMemoryWeb3AuthNonceRepositoryHarness::new();
    cryptotrade_auth_web3_repo_tests::test_set_and_get_nonce(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_rotate_nonce() {
    let harness = InMemoryWeb3AuthNonceRepositoryHarness::new();
    cryptotrade_auth_web3_repo_tests::test_rotate_nonce(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_rotate_missing_nonce() {
    let harness = InMemoryWeb3AuthNonceRepositoryHarness::new();
    cryptotrade_auth_web3_repo_tests::test_rotate_missing_nonce(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn test_concurrent_rotation_has_single_winner() {
    let harness = InMemoryWeb3AuthNonceRepositoryHarness::new();
    cryptotrade_auth_web3_repo_tests::test_concurrent_rotation_has_single_winner(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_cleanup_expired_nonces() {
    let harness = InMemoryWeb3AuthNonceRepositoryHarness::new();
    cryptotrade_auth_web3_repo_tests::test_cleanup_expired_nonces(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct InMemoryWeb3AuthNonceRepositoryHarness {
    catalog: Catalog,
}

impl InMemoryWeb3AuthNonceRepositoryHarness {
    pub fn new() -> Self {
        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add::<InMemoryWeb3AuthNonceRepository>();

        Self {
            catalog: catalog_builder.build(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
