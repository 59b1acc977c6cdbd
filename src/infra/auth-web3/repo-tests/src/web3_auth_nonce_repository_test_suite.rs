// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Duration, Utc};
use cryptotrade_accounts::testing::{dummy_registration_time, test_hex_address};
use cryptotrade_auth_web3::*;
use dill::Catalog;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn minutes_later(minutes: i64) -> DateTime<Utc> {
    dummy_registration_time() + Duration::minutes(minutes)
}

fn make_challenge(seed: u32, issued_minute: i64) -> Web3AuthChallenge {
    Web3AuthChallenge::new(
        test_hex_address(seed),
        minutes_later(issued_minute),
        Duration::minutes(10),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_missing_nonce_not_found(catalog: &Catalog) {
    let nonce_repo = catalog.get_one::<dyn Web3AuthNonceRepository>().unwrap();

    let wallet = test_hex_address(1);
    assert_eq!(
        nonce_repo.get_nonce(&wallet).await,
        Err(GetNonceError::NotFound { wallet })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_and_get_nonce(catalog: &Catalog) {
    let nonce_repo = catalog.get_one::<dyn Web3AuthNonceRepository>().unwrap();

    let wasya = make_challenge(1, 0);
    let petya = make_challenge(2, 0);

    nonce_repo.set_nonce(&wasya).await.unwrap();
    nonce_repo.set_nonce(&petya).await.unwrap();

    assert_eq!(
        nonce_repo.get_nonce(&wasya.wallet_address).await.unwrap(),
        wasya
    );
    assert_eq!(
        nonce_repo.get_nonce(&petya.wallet_address).await.unwrap(),
        petya
    );

    // A newer challenge replaces the previous one
    let wasya_again = make_challenge(1, 1);
    nonce_repo.set_nonce(&wasya_again).await.unwrap();

    assert_eq!(
        nonce_repo.get_nonce(&wasya.wallet_address).await.unwrap(),
        wasya_again
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_rotate_nonce(catalog: &Catalog) {
    let nonce_repo = catalog.get_one::<dyn Web3AuthNonceRepository>().unwrap();

    let issued = make_challenge(1, 0);
    nonce_repo.set_nonce(&issued).await.unwrap();

    let rotated = make_challenge(1, 1);
    nonce_repo
        .rotate_nonce(&issued.nonce, &rotated)
        .await
        .unwrap();

    assert_eq!(
        nonce_repo.get_nonce(&issued.wallet_address).await.unwrap(),
        rotated
    );

    // The consumed nonce cannot be rotated again
    assert_eq!(
        nonce_repo
            .rotate_nonce(&issued.nonce, &make_challenge(1, 2))
            .await,
        Err(RotateNonceError::Stale {
            wallet: issued.wallet_address.clone()
        })
    );
    assert_eq!(
        nonce_repo.get_nonce(&issued.wallet_address).await.unwrap(),
        rotated
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_rotate_missing_nonce(catalog: &Catalog) {
    let nonce_repo = catalog.get_one::<dyn Web3AuthNonceRepository>().unwrap();

    let replacement = make_challenge(1, 0);
    assert_eq!(
        nonce_repo
            .rotate_nonce(&Web3AuthNonce::new(), &replacement)
            .await,
        Err(RotateNonceError::NotFound {
            wallet: replacement.wallet_address.clone()
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_concurrent_rotation_has_single_winner(catalog: &Catalog) {
    let nonce_repo = catalog.get_one::<dyn Web3AuthNonceRepository>().unwrap();

    let issued = make_challenge(1, 0);
    nonce_repo.set_nonce(&issued).await.unwrap();

    let attempts = (0..16).map(|i| {
        let nonce_repo = nonce_repo.clone();
        let expected = issued.nonce.clone();
        async move {
            nonce_repo
                .rotate_nonce(&expected, &make_challenge(1, i + 1))
                .await
        }
    });
    let results = futures::future::join_all(attempts).await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RotateNonceError::Stale { .. }))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_cleanup_expired_nonces(catalog: &Catalog) {
    let nonce_repo = catalog.get_one::<dyn Web3AuthNonceRepository>().unwrap();

    let stale = make_challenge(1, 0);
    let fresh = make_challenge(2, 30);
    nonce_repo.set_nonce(&stale).await.unwrap();
    nonce_repo.set_nonce(&fresh).await.unwrap();

    // Before anything expires
    assert_eq!(
        nonce_repo
            .cleanup_expired_nonces(minutes_later(5))
            .await
            .unwrap(),
        0
    );

    assert_eq!(
        nonce_repo
            .cleanup_expired_nonces(minutes_later(35))
            .await
            .unwrap(),
        1
    );

    assert_eq!(
        nonce_repo.get_nonce(&stale.wallet_address).await,
        Err(GetNonceError::NotFound {
            wallet: stale.wallet_address.clone()
        })
    );
    assert_eq!(
        nonce_repo.get_nonce(&fresh.wallet_address).await.unwrap(),
        fresh
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
