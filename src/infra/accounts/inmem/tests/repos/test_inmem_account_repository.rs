// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts_inmem::InMemoryAccountRepository;
use dill::{Catalog, CatalogBuilder};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_missing_account_not_found() {
    let harness = InMemoryAccountRepositoryHarness::new();
    cryptotrade_accounts_repo_tests::test_missing_account_not_found(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_insert_and_locate_account() {
    let harness = InMemoryAccountRepositoryHarness::new();
    cryptotrade_accounts_repo_tests::test_insert_and_locate_account(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_insert_account_duplicates() {
    let harness = InMemoryAccountRepositoryHarness::new();
    cryptotrade_accounts_repo_tests::test_insert_account_duplicates(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_account_with_wallet() {
    let harness = InMemoryAccountRepositoryHarness::new();
    cryptotrade_accounts_repo_tests::test_create_account_with_wallet(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_account_with_bound_wallet_leaves_no_orphan() {
    let harness = InMemoryAccountRepositoryHarness::new();
    cryptotrade_accounts_repo_tests::test_create_account_with_bound_wallet_leaves_no_orphan(&harness.catalog).await;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct InMemoryAccountRepositoryHarness {
    catalog: Catalog,
}

impl InMemoryAccountRepositoryHarness {
    pub fn new() -> Self {
        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add::<InMemoryAccountRepository>();

        Self {
            catalog: catalog_builder.build(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
