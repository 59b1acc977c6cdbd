// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Duration;
use cryptotrade_accounts::testing::{dummy_registration_time, test_hex_address};
use cryptotrade_accounts::{
    Account,
    AccountRepository,
    WalletAccountsConfig,
    WalletBinding,
    WalletBindingRepository,
    WalletType,
};
use cryptotrade_accounts_inmem::InMemoryAccountRepository;
use cryptotrade_auth_web3::*;
use cryptotrade_auth_web3_inmem::InMemoryWeb3AuthNonceRepository;
use cryptotrade_auth_web3_services::{JOB_CRYPTOTRADE_WEB3_NONCE_CLEANUP, Web3NonceServiceImpl};
use pretty_assertions::assert_eq;
use time_source::{SystemTimeSource, SystemTimeSourceStub};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_issue_challenge() {
    let harness = Web3NonceServiceHarness::new(WalletAccountsConfig::default());
    let wallet_address = test_hex_address(1);

    let issued = harness
        .nonce_service
        .issue_challenge(&wallet_address)
        .await
        .unwrap();

    let challenge = &issued.challenge;
    assert_eq!(challenge.wallet_address, wallet_address);
    assert_eq!(challenge.issued_at, dummy_registration_time());
    assert_eq!(
        challenge.expires_at,
        dummy_registration_time() + Duration::minutes(10)
    );
    assert_eq!(
        issued.message,
        format!(
            "Welcome to CryptoTrade.gg!\n\nPlease sign this message to verify your wallet \
             ownership.\n\nNonce: {}",
            challenge.nonce
        )
    );

    assert_eq!(
        harness.nonce_repo.get_nonce(&wallet_address).await,
        Ok(issued.challenge)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_reissue_replaces_challenge() {
    let harness = Web3NonceServiceHarness::new(WalletAccountsConfig::default());
    let wallet_address = test_hex_address(1);

    let first = harness
        .nonce_service
        .issue_challenge(&wallet_address)
        .await
        .unwrap();

    harness.time_source.advance(Duration::minutes(3));

    let second = harness
        .nonce_service
        .issue_challenge(&wallet_address)
        .await
        .unwrap();

    assert_ne!(first.challenge.nonce, second.challenge.nonce);
    assert_ne!(first.message, second.message);
    assert_eq!(
        second.challenge.expires_at,
        dummy_registration_time() + Duration::minutes(13)
    );

    // Only the latest challenge is pending
    assert_eq!(
        harness.nonce_repo.get_nonce(&wallet_address).await,
        Ok(second.challenge)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_challenges_are_per_address() {
    let harness = Web3NonceServiceHarness::new(WalletAccountsConfig::default());

    let first = harness
        .nonce_service
        .issue_challenge(&test_hex_address(1))
        .await
        .unwrap();
    let second = harness
        .nonce_service
        .issue_challenge(&test_hex_address(2))
        .await
        .unwrap();

    assert_ne!(first.challenge.nonce, second.challenge.nonce);
    assert_eq!(
        harness.nonce_repo.get_nonce(&test_hex_address(1)).await,
        Ok(first.challenge)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_issue_challenge_does_not_create_accounts() {
    let harness = Web3NonceServiceHarness::new(WalletAccountsConfig::default());

    harness
        .nonce_service
        .issue_challenge(&test_hex_address(1))
        .await
        .unwrap();

    assert_eq!(
        harness
            .wallet_repo
            .find_wallet_binding_by_address(&test_hex_address(1))
            .await
            .unwrap(),
        None
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_sign_up_disabled() {
    let harness = Web3NonceServiceHarness::new(WalletAccountsConfig {
        sign_up_via_wallet: false,
        ..WalletAccountsConfig::default()
    });

    assert_matches!(
        harness.nonce_service.issue_challenge(&test_hex_address(1)).await,
        Err(IssueChallengeError::NotFound(UnregisteredWalletError { wallet_address }))
            if wallet_address == test_hex_address(1)
    );
    assert_matches!(
        harness.nonce_repo.get_nonce(&test_hex_address(1)).await,
        Err(GetNonceError::NotFound { .. })
    );

    // Wallets that are already bound can still sign in
    let account = Account::test("wasya");
    harness
        .account_repo
        .create_account_with_wallet(
            &account,
            &WalletBinding {
                is_primary: true,
                ..WalletBinding::new(
                    account.id,
                    test_hex_address(2),
                    WalletType::Ethereum,
                    dummy_registration_time(),
                )
            },
        )
        .await
        .unwrap();

    assert_matches!(
        harness.nonce_service.issue_challenge(&test_hex_address(2)).await,
        Ok(_)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_startup_cleanup_purges_expired_challenges() {
    let harness = Web3NonceServiceHarness::new(WalletAccountsConfig::default());

    let stale = harness
        .nonce_service
        .issue_challenge(&test_hex_address(1))
        .await
        .unwrap();

    harness.time_source.advance(Duration::minutes(8));

    let fresh = harness
        .nonce_service
        .issue_challenge(&test_hex_address(2))
        .await
        .unwrap();

    harness.time_source.advance(Duration::minutes(2));

    let executed = init_on_startup::run_startup_jobs(&harness.catalog)
        .await
        .unwrap();
    assert_eq!(executed, vec![JOB_CRYPTOTRADE_WEB3_NONCE_CLEANUP]);

    assert_matches!(
        harness.nonce_repo.get_nonce(&stale.challenge.wallet_address).await,
        Err(GetNonceError::NotFound { .. })
    );
    assert_eq!(
        harness.nonce_repo.get_nonce(&test_hex_address(2)).await,
        Ok(fresh.challenge)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_issue_challenge_purges_expired_challenges() {
    let harness = Web3NonceServiceHarness::new(WalletAccountsConfig::default());

    init_on_startup::run_startup_jobs(&harness.catalog)
        .await
        .unwrap();

    for i in 1..=50 {
        harness
            .nonce_service
            .issue_challenge(&test_hex_address(i))
            .await
            .unwrap();
    }

    harness.time_source.advance(Duration::days(30));

    let latest = harness
        .nonce_service
        .issue_challenge(&test_hex_address(51))
        .await
        .unwrap();

    for i in 1..=50 {
        assert_matches!(
            harness.nonce_repo.get_nonce(&test_hex_address(i)).await,
            Err(GetNonceError::NotFound { .. })
        );
    }
    assert_eq!(
        harness.nonce_repo.get_nonce(&test_hex_address(51)).await,
        Ok(latest.challenge)
    );
    assert_eq!(
        harness
            .nonce_repo
            .cleanup_expired_nonces(harness.time_source.now())
            .await,
        Ok(0)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct Web3NonceServiceHarness {
    catalog: dill::Catalog,
    nonce_service: Arc<dyn Web3NonceService>,
    nonce_repo: Arc<dyn Web3AuthNonceRepository>,
    account_repo: Arc<dyn AccountRepository>,
    wallet_repo: Arc<dyn WalletBindingRepository>,
    time_source: SystemTimeSourceStub,
}

impl Web3NonceServiceHarness {
    fn new(accounts_config: WalletAccountsConfig) -> Self {
        let time_source = SystemTimeSourceStub::new_set(dummy_registration_time());

        let catalog = {
            let mut b = dill::CatalogBuilder::new();
            b.add::<Web3NonceServiceImpl>()
                .add::<InMemoryWeb3AuthNonceRepository>()
                .add::<InMemoryAccountRepository>()
                .add_value(Web3AuthConfig::default())
                .add_value(accounts_config)
                .add_value(time_source.clone())
                .bind::<dyn SystemTimeSource, SystemTimeSourceStub>();
            b.build()
        };

        Self {
            nonce_service: catalog.get_one().unwrap(),
            nonce_repo: catalog.get_one().unwrap(),
            account_repo: catalog.get_one().unwrap(),
            wallet_repo: catalog.get_one().unwrap(),
            catalog,
            time_source,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
