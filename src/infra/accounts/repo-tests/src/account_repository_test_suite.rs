// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use cryptotrade_accounts::*;
use dill::Catalog;
use pretty_assertions::assert_eq;

use crate::make_test_wallet;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_missing_account_not_found(catalog: &Catalog) {
    let account_repo = catalog.get_one::<dyn AccountRepository>().unwrap();

    let account_id = AccountID::new_generated();
    let result = account_repo.get_account_by_id(&account_id).await;
    assert_matches!(
        result,
        Err(GetAccountByIdError::NotFound(AccountNotFoundByIdError { account_id: id }))
            if id == account_id
    );

    let username = AccountUsername::try_new("nobody").unwrap();
    assert_eq!(
        account_repo
            .find_account_id_by_username(&username)
            .await
            .unwrap(),
        None
    );
    assert_eq!(account_repo.accounts_count().await.unwrap(), 0);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_insert_and_locate_account(catalog: &Catalog) {
    let account_repo = catalog.get_one::<dyn AccountRepository>().unwrap();

    let account = Account::test_with_email("wasya");
    account_repo.create_account(&account).await.unwrap();

    assert_eq!(
        account_repo.get_account_by_id(&account.id).await.unwrap(),
        account
    );
    assert_eq!(
        account_repo
            .find_account_id_by_username(&account.username)
            .await
            .unwrap(),
        Some(account.id)
    );
    assert_eq!(account_repo.accounts_count().await.unwrap(), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_insert_account_duplicates(catalog: &Catalog) {
    let account_repo = catalog.get_one::<dyn AccountRepository>().unwrap();

    let account = Account::test_with_email("wasya");
    account_repo.create_account(&account).await.unwrap();

    let same_id = Account {
        id: account.id,
        ..Account::test("petya")
    };
    assert_matches!(
        account_repo.create_account(&same_id).await,
        Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
            account_field: CreateAccountDuplicateField::Id
        }))
    );

    let same_username = Account::test("wasya");
    assert_matches!(
        account_repo.create_account(&same_username).await,
        Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
            account_field: CreateAccountDuplicateField::Username
        }))
    );

    let same_email = Account {
        email: Some("WASYA@example.com".to_string()),
        ..Account::test_with_email("petya")
    };
    assert_matches!(
        account_repo.create_account(&same_email).await,
        Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
            account_field: CreateAccountDuplicateField::Email
        }))
    );

    assert_eq!(account_repo.accounts_count().await.unwrap(), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_account_with_wallet(catalog: &Catalog) {
    let account_repo = catalog.get_one::<dyn AccountRepository>().unwrap();
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let account = Account::test("wasya");
    let wallet = make_test_wallet(account.id, 1, 0);

    account_repo
        .create_account_with_wallet(&account, &wallet)
        .await
        .unwrap();

    let stored = wallet_repo
        .find_wallet_binding_by_address(&wallet.address)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        stored,
        WalletBinding {
            is_primary: true,
            ..wallet
        }
    );
    assert_eq!(
        account_repo.get_account_by_id(&account.id).await.unwrap(),
        account
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_account_with_bound_wallet_leaves_no_orphan(catalog: &Catalog) {
    let account_repo = catalog.get_one::<dyn AccountRepository>().unwrap();
    let wallet_repo = catalog.get_one::<dyn WalletBindingRepository>().unwrap();

    let wasya = Account::test("wasya");
    let wallet = make_test_wallet(wasya.id, 1, 0);
    account_repo
        .create_account_with_wallet(&wasya, &wallet)
        .await
        .unwrap();

    let petya = Account::test("petya");
    let same_address = make_test_wallet(petya.id, 1, 1);
    assert_matches!(
        account_repo
            .create_account_with_wallet(&petya, &same_address)
            .await,
        Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
            account_field: CreateAccountDuplicateField::WalletAddress
        }))
    );

    assert_eq!(account_repo.accounts_count().await.unwrap(), 1);
    assert_matches!(
        account_repo.get_account_by_id(&petya.id).await,
        Err(GetAccountByIdError::NotFound(_))
    );
    assert_eq!(
        wallet_repo
            .find_wallet_binding_by_address(&wallet.address)
            .await
            .unwrap()
            .map(|w| w.account_id),
        Some(wasya.id)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
