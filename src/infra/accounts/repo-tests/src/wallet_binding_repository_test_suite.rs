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
use cryptotrade_accounts::*;
use dill::Catalog;
use pretty_assertions::assert_eq;

use crate::{make_test_wallet, minutes_after_registration};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

async fn create_account_with_wallet(
    catalog: &Catalog,
    username: &str,
    seed: u32,
) -> (Account, WalletBinding) {
    let account_repo = catalog.get_one::<dyn AccountRepository>().unwrap();
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let account = Account::test(username);
    let wallet = make_test_wallet(account.id, seed, 0);
    account_repo
        .create_account_with_wallet(&account, &wallet)
        .await
        .unwrap();

    let wallet = wallet_repo.get_wallet_binding(&wallet.id).await.unwrap();
    (account, wallet)
}

async fn primary_wallet_ids(
    wallet_repo: &Arc<dyn WalletBindingRepository>,
    account_id: &AccountID,
) -> Vec<WalletID> {
    wallet_repo
        .get_account_wallet_bindings(account_id)
        .await
        .unwrap()
        .into_iter()
        .filter(|w| w.is_primary)
        .map(|w| w.id)
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_missing_wallet_not_found(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let wallet_id = WalletID::new_generated();
    assert_matches!(
        wallet_repo.get_wallet_binding(&wallet_id).await,
        Err(GetWalletBindingError::NotFound(WalletBindingNotFoundError { wallet_id: id }))
            if id == wallet_id
    );
    assert_matches!(
        wallet_repo
            .touch_wallet_binding(&wallet_id, minutes_after_registration(1))
            .await,
        Err(TouchWalletBindingError::NotFound(_))
    );
    assert_matches!(
        wallet_repo.delete_wallet_binding(&wallet_id, false).await,
        Err(DeleteWalletBindingError::NotFound(_))
    );
    assert_eq!(
        wallet_repo
            .find_wallet_binding_by_address(&testing::test_hex_address(404))
            .await
            .unwrap(),
        None
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_add_wallets_first_one_primary(catalog: &Catalog) {
    let account_repo = catalog.get_one::<dyn AccountRepository>().unwrap();
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let account = Account::test_with_email("wasya");
    account_repo.create_account(&account).await.unwrap();
    assert!(
        wallet_repo
            .get_account_wallet_bindings(&account.id)
            .await
            .unwrap()
            .is_empty()
    );

    // The flag of the argument is ignored
    let first = wallet_repo
        .add_wallet_binding(&make_test_wallet(account.id, 1, 2))
        .await
        .unwrap();
    let second = wallet_repo
        .add_wallet_binding(&WalletBinding {
            is_primary: true,
            ..make_test_wallet(account.id, 2, 1)
        })
        .await
        .unwrap();
    let third = wallet_repo
        .add_wallet_binding(&make_test_wallet(account.id, 3, 0))
        .await
        .unwrap();

    assert!(first.is_primary);
    assert!(!second.is_primary);
    assert!(!third.is_primary);

    // Primary first, then by creation time
    let listed: Vec<_> = wallet_repo
        .get_account_wallet_bindings(&account.id)
        .await
        .unwrap()
        .into_iter()
        .map(|w| w.id)
        .collect();
    assert_eq!(listed, vec![first.id, third.id, second.id]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_add_wallet_duplicate_address(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let (wasya, wasya_wallet) = create_account_with_wallet(catalog, "wasya", 1).await;
    let (petya, _) = create_account_with_wallet(catalog, "petya", 2).await;

    for account_id in [wasya.id, petya.id] {
        assert_matches!(
            wallet_repo
                .add_wallet_binding(&make_test_wallet(account_id, 1, 5))
                .await,
            Err(AddWalletBindingError::Duplicate(WalletAddressAlreadyBoundError { address }))
                if address == wasya_wallet.address
        );
    }

    assert_eq!(
        wallet_repo
            .get_account_wallet_bindings(&petya.id)
            .await
            .unwrap()
            .len(),
        1
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_add_wallet_unknown_account(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let account_id = AccountID::new_generated();
    assert_matches!(
        wallet_repo
            .add_wallet_binding(&make_test_wallet(account_id, 1, 0))
            .await,
        Err(AddWalletBindingError::AccountNotFound(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_primary_wallet(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let (account, first) = create_account_with_wallet(catalog, "wasya", 1).await;
    let second = wallet_repo
        .add_wallet_binding(&make_test_wallet(account.id, 2, 1))
        .await
        .unwrap();

    wallet_repo
        .set_primary_wallet_binding(&account.id, &second.id)
        .await
        .unwrap();
    assert_eq!(
        primary_wallet_ids(&wallet_repo, &account.id).await,
        vec![second.id]
    );

    // Idempotent
    wallet_repo
        .set_primary_wallet_binding(&account.id, &second.id)
        .await
        .unwrap();
    assert_eq!(
        primary_wallet_ids(&wallet_repo, &account.id).await,
        vec![second.id]
    );

    wallet_repo
        .set_primary_wallet_binding(&account.id, &first.id)
        .await
        .unwrap();
    assert_eq!(
        primary_wallet_ids(&wallet_repo, &account.id).await,
        vec![first.id]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_primary_foreign_wallet(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let (wasya, wasya_wallet) = create_account_with_wallet(catalog, "wasya", 1).await;
    let (petya, petya_wallet) = create_account_with_wallet(catalog, "petya", 2).await;

    assert_matches!(
        wallet_repo
            .set_primary_wallet_binding(&wasya.id, &petya_wallet.id)
            .await,
        Err(SetPrimaryWalletBindingError::NotFound(WalletBindingNotFoundError { wallet_id }))
            if wallet_id == petya_wallet.id
    );
    assert_matches!(
        wallet_repo
            .set_primary_wallet_binding(&wasya.id, &WalletID::new_generated())
            .await,
        Err(SetPrimaryWalletBindingError::NotFound(_))
    );

    assert_eq!(
        primary_wallet_ids(&wallet_repo, &wasya.id).await,
        vec![wasya_wallet.id]
    );
    assert_eq!(
        primary_wallet_ids(&wallet_repo, &petya.id).await,
        vec![petya_wallet.id]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_concurrent_set_primary_keeps_single_primary(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let (account, first) = create_account_with_wallet(catalog, "wasya", 1).await;
    let mut wallet_ids = vec![first.id];
    for seed in 2..=8 {
        let wallet = wallet_repo
            .add_wallet_binding(&make_test_wallet(account.id, seed, i64::from(seed)))
            .await
            .unwrap();
        wallet_ids.push(wallet.id);
    }

    let calls = wallet_ids.iter().cycle().take(32).map(|wallet_id| {
        let wallet_repo = wallet_repo.clone();
        let account_id = account.id;
        let wallet_id = *wallet_id;
        async move {
            wallet_repo
                .set_primary_wallet_binding(&account_id, &wallet_id)
                .await
        }
    });
    for res in futures::future::join_all(calls).await {
        res.unwrap();
    }

    assert_eq!(primary_wallet_ids(&wallet_repo, &account.id).await.len(), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_touch_wallet(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let (_, wallet) = create_account_with_wallet(catalog, "wasya", 1).await;

    let used_at = minutes_after_registration(30);
    let touched = wallet_repo
        .touch_wallet_binding(&wallet.id, used_at)
        .await
        .unwrap();

    assert_eq!(
        touched,
        WalletBinding {
            last_used_at: used_at,
            ..wallet.clone()
        }
    );
    assert_eq!(
        wallet_repo.get_wallet_binding(&wallet.id).await.unwrap(),
        touched
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_set_wallet_nickname(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let (wasya, wallet) = create_account_with_wallet(catalog, "wasya", 1).await;
    let (petya, _) = create_account_with_wallet(catalog, "petya", 2).await;
    assert_eq!(wallet.nickname, None);

    let renamed = wallet_repo
        .set_wallet_binding_nickname(&wasya.id, &wallet.id, Some("Cold storage".to_string()))
        .await
        .unwrap();
    assert_eq!(
        renamed,
        WalletBinding {
            nickname: Some("Cold storage".to_string()),
            ..wallet.clone()
        }
    );
    assert_eq!(
        wallet_repo.get_wallet_binding(&wallet.id).await.unwrap(),
        renamed
    );

    // Foreign and unknown wallets
    assert_matches!(
        wallet_repo
            .set_wallet_binding_nickname(&petya.id, &wallet.id, None)
            .await,
        Err(SetWalletBindingNicknameError::NotFound(WalletBindingNotFoundError { wallet_id }))
            if wallet_id == wallet.id
    );
    assert_matches!(
        wallet_repo
            .set_wallet_binding_nickname(&wasya.id, &WalletID::new_generated(), None)
            .await,
        Err(SetWalletBindingNicknameError::NotFound(_))
    );

    let cleared = wallet_repo
        .set_wallet_binding_nickname(&wasya.id, &wallet.id, None)
        .await
        .unwrap();
    assert_eq!(cleared, wallet);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_delete_last_wallet(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let (account, wallet) = create_account_with_wallet(catalog, "wasya", 1).await;

    assert_matches!(
        wallet_repo.delete_wallet_binding(&wallet.id, true).await,
        Err(DeleteWalletBindingError::LastWallet(LastWalletBindingError { account_id, wallet_id }))
            if account_id == account.id && wallet_id == wallet.id
    );
    assert_eq!(
        primary_wallet_ids(&wallet_repo, &account.id).await,
        vec![wallet.id]
    );

    let deleted = wallet_repo
        .delete_wallet_binding(&wallet.id, false)
        .await
        .unwrap();
    assert_eq!(deleted, wallet);

    assert!(
        wallet_repo
            .get_account_wallet_bindings(&account.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        wallet_repo
            .find_wallet_binding_by_address(&wallet.address)
            .await
            .unwrap(),
        None
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_delete_primary_promotes_most_recently_used(catalog: &Catalog) {
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let (account, primary) = create_account_with_wallet(catalog, "wasya", 1).await;
    let older = wallet_repo
        .add_wallet_binding(&make_test_wallet(account.id, 2, 1))
        .await
        .unwrap();
    let newer = wallet_repo
        .add_wallet_binding(&make_test_wallet(account.id, 3, 2))
        .await
        .unwrap();

    wallet_repo
        .touch_wallet_binding(&older.id, minutes_after_registration(60))
        .await
        .unwrap();

    wallet_repo
        .delete_wallet_binding(&primary.id, true)
        .await
        .unwrap();

    assert_eq!(
        primary_wallet_ids(&wallet_repo, &account.id).await,
        vec![older.id]
    );

    // Deleting a non-primary binding keeps the primary as is
    wallet_repo
        .delete_wallet_binding(&newer.id, true)
        .await
        .unwrap();
    assert_eq!(
        primary_wallet_ids(&wallet_repo, &account.id).await,
        vec![older.id]
    );

    // The address is free to be bound again
    let rebound = wallet_repo
        .add_wallet_binding(&make_test_wallet(account.id, 1, 90))
        .await
        .unwrap();
    assert!(!rebound.is_primary);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
