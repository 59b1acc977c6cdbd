// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use dill::*;

use crate::domain::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Accounts and their wallet bindings behind a single lock, so that every
/// operation spanning both is atomic
pub struct InMemoryAccountRepository {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    accounts_by_id: HashMap<AccountID, Account>,
    account_id_by_username: HashMap<AccountUsername, AccountID>,
    wallets_by_id: HashMap<WalletID, WalletBinding>,
    wallet_id_by_address: HashMap<WalletAddress, WalletID>,
}

impl State {
    fn check_account_duplicates(&self, account: &Account) -> Result<(), CreateAccountError> {
        let duplicate = |account_field| {
            Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
                account_field,
            }))
        };

        if self.accounts_by_id.contains_key(&account.id) {
            return duplicate(CreateAccountDuplicateField::Id);
        }
        if self.account_id_by_username.contains_key(&account.username) {
            return duplicate(CreateAccountDuplicateField::Username);
        }
        if let Some(email) = &account.email {
            for existing in self.accounts_by_id.values() {
                if let Some(existing_email) = &existing.email
                    && existing_email.eq_ignore_ascii_case(email)
                {
                    return duplicate(CreateAccountDuplicateField::Email);
                }
            }
        }

        Ok(())
    }

    fn insert_account(&mut self, account: &Account) {
        self.account_id_by_username
            .insert(account.username.clone(), account.id);
        self.accounts_by_id.insert(account.id, account.clone());
    }

    fn insert_wallet(&mut self, wallet: WalletBinding) {
        self.wallet_id_by_address
            .insert(wallet.address.clone(), wallet.id);
        self.wallets_by_id.insert(wallet.id, wallet);
    }

    fn account_wallet_ids(&self, account_id: &AccountID) -> Vec<WalletID> {
        self.wallets_by_id
            .values()
            .filter(|w| w.account_id == *account_id)
            .map(|w| w.id)
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn AccountRepository)]
#[interface(dyn WalletBindingRepository)]
#[scope(Singleton)]
impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_account(&self, account: &Account) -> Result<(), CreateAccountError> {
        let mut guard = self.state.lock().unwrap();

        guard.check_account_duplicates(account)?;
        guard.insert_account(account);

        Ok(())
    }

    async fn create_account_with_wallet(
        &self,
        account: &Account,
        wallet: &WalletBinding,
    ) -> Result<(), CreateAccountError> {
        let mut guard = self.state.lock().unwrap();

        guard.check_account_duplicates(account)?;
        if guard.wallet_id_by_address.contains_key(&wallet.address)
            || guard.wallets_by_id.contains_key(&wallet.id)
        {
            return Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
                account_field: CreateAccountDuplicateField::WalletAddress,
            }));
        }

        guard.insert_account(account);
        guard.insert_wallet(WalletBinding {
            account_id: account.id,
            is_primary: true,
            ..wallet.clone()
        });

        Ok(())
    }

    async fn get_account_by_id(
        &self,
        account_id: &AccountID,
    ) -> Result<Account, GetAccountByIdError> {
        let guard = self.state.lock().unwrap();
        if let Some(account) = guard.accounts_by_id.get(account_id) {
            Ok(account.clone())
        } else {
            Err(GetAccountByIdError::NotFound(AccountNotFoundByIdError {
                account_id: *account_id,
            }))
        }
    }

    async fn find_account_id_by_username(
        &self,
        username: &AccountUsername,
    ) -> Result<Option<AccountID>, FindAccountIdByUsernameError> {
        let guard = self.state.lock().unwrap();
        Ok(guard.account_id_by_username.get(username).copied())
    }

    async fn accounts_count(&self) -> Result<usize, AccountsCountError> {
        let guard = self.state.lock().unwrap();
        Ok(guard.accounts_by_id.len())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl WalletBindingRepository for InMemoryAccountRepository {
    async fn add_wallet_binding(
        &self,
        wallet: &WalletBinding,
    ) -> Result<WalletBinding, AddWalletBindingError> {
        let mut guard = self.state.lock().unwrap();

        if !guard.accounts_by_id.contains_key(&wallet.account_id) {
            return Err(AddWalletBindingError::AccountNotFound(
                AccountNotFoundByIdError {
                    account_id: wallet.account_id,
                },
            ));
        }
        if guard.wallet_id_by_address.contains_key(&wallet.address) {
            return Err(AddWalletBindingError::Duplicate(
                WalletAddressAlreadyBoundError {
                    address: wallet.address.clone(),
                },
            ));
        }

        let stored = WalletBinding {
            is_primary: guard.account_wallet_ids(&wallet.account_id).is_empty(),
            ..wallet.clone()
        };
        guard.insert_wallet(stored.clone());

        Ok(stored)
    }

    async fn get_wallet_binding(
        &self,
        wallet_id: &WalletID,
    ) -> Result<WalletBinding, GetWalletBindingError> {
        let guard = self.state.lock().unwrap();
        guard.wallets_by_id.get(wallet_id).cloned().ok_or_else(|| {
            GetWalletBindingError::NotFound(WalletBindingNotFoundError {
                wallet_id: *wallet_id,
            })
        })
    }

    async fn find_wallet_binding_by_address(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<WalletBinding>, FindWalletBindingError> {
        let guard = self.state.lock().unwrap();
        Ok(guard
            .wallet_id_by_address
            .get(address)
            .and_then(|wallet_id| guard.wallets_by_id.get(wallet_id))
            .cloned())
    }

    async fn get_account_wallet_bindings(
        &self,
        account_id: &AccountID,
    ) -> Result<Vec<WalletBinding>, GetAccountWalletBindingsError> {
        let guard = self.state.lock().unwrap();

        let mut wallets: Vec<_> = guard
            .wallets_by_id
            .values()
            .filter(|w| w.account_id == *account_id)
            .cloned()
            .collect();

        wallets.sort_by(|a, b| {
            b.is_primary
                .cmp(&a.is_primary)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });

        Ok(wallets)
    }

    async fn set_primary_wallet_binding(
        &self,
        account_id: &AccountID,
        wallet_id: &WalletID,
    ) -> Result<(), SetPrimaryWalletBindingError> {
        let mut guard = self.state.lock().unwrap();

        match guard.wallets_by_id.get(wallet_id) {
            Some(wallet) if wallet.account_id == *account_id => {}
            _ => {
                return Err(SetPrimaryWalletBindingError::NotFound(
                    WalletBindingNotFoundError {
                        wallet_id: *wallet_id,
                    },
                ));
            }
        }

        for wallet in guard
            .wallets_by_id
            .values_mut()
            .filter(|w| w.account_id == *account_id)
        {
            wallet.is_primary = wallet.id == *wallet_id;
        }

        Ok(())
    }

    async fn set_wallet_binding_nickname(
        &self,
        account_id: &AccountID,
        wallet_id: &WalletID,
        nickname: Option<String>,
    ) -> Result<WalletBinding, SetWalletBindingNicknameError> {
        let mut guard = self.state.lock().unwrap();

        match guard.wallets_by_id.get_mut(wallet_id) {
            Some(wallet) if wallet.account_id == *account_id => {
                wallet.nickname = nickname;
                Ok(wallet.clone())
            }
            _ => Err(SetWalletBindingNicknameError::NotFound(
                WalletBindingNotFoundError {
                    wallet_id: *wallet_id,
                },
            )),
        }
    }

    async fn touch_wallet_binding(
        &self,
        wallet_id: &WalletID,
        used_at: DateTime<Utc>,
    ) -> Result<WalletBinding, TouchWalletBindingError> {
        let mut guard = self.state.lock().unwrap();

        let Some(wallet) = guard.wallets_by_id.get_mut(wallet_id) else {
            return Err(TouchWalletBindingError::NotFound(
                WalletBindingNotFoundError {
                    wallet_id: *wallet_id,
                },
            ));
        };

        wallet.last_used_at = used_at;
        Ok(wallet.clone())
    }

    async fn delete_wallet_binding(
        &self,
        wallet_id: &WalletID,
        keep_last: bool,
    ) -> Result<WalletBinding, DeleteWalletBindingError> {
        let mut guard = self.state.lock().unwrap();

        let Some(wallet) = guard.wallets_by_id.get(wallet_id).cloned() else {
            return Err(DeleteWalletBindingError::NotFound(
                WalletBindingNotFoundError {
                    wallet_id: *wallet_id,
                },
            ));
        };

        let remaining: Vec<_> = guard
            .account_wallet_ids(&wallet.account_id)
            .into_iter()
            .filter(|id| id != wallet_id)
            .collect();

        if keep_last && remaining.is_empty() {
            return Err(DeleteWalletBindingError::LastWallet(
                LastWalletBindingError {
                    account_id: wallet.account_id,
                    wallet_id: *wallet_id,
                },
            ));
        }

        guard.wallets_by_id.remove(wallet_id);
        guard.wallet_id_by_address.remove(&wallet.address);

        if wallet.is_primary {
            let successor_id = remaining
                .iter()
                .filter_map(|id| guard.wallets_by_id.get(id))
                .max_by(|a, b| {
                    a.last_used_at
                        .cmp(&b.last_used_at)
                        .then(a.created_at.cmp(&b.created_at))
                })
                .map(|w| w.id);

            if let Some(successor) = successor_id.and_then(|id| guard.wallets_by_id.get_mut(&id))
            {
                successor.is_primary = true;
            }
        }

        Ok(wallet)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
