// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use cryptotrade_accounts::*;
use internal_error::ResultIntoInternal;
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn WalletRegistry)]
pub struct WalletRegistryImpl {
    account_repo: Arc<dyn AccountRepository>,
    wallet_repo: Arc<dyn WalletBindingRepository>,
    config: Arc<WalletAccountsConfig>,
    time_source: Arc<dyn SystemTimeSource>,
}

impl WalletRegistryImpl {
    fn keep_last_wallet(&self, account: &Account) -> bool {
        match self.config.last_wallet_removal {
            LastWalletRemovalPolicy::Allow => false,
            LastWalletRemovalPolicy::RequireAlternativeCredential => {
                !account.has_alternative_credential()
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl WalletRegistry for WalletRegistryImpl {
    #[tracing::instrument(level = "debug", skip_all, fields(%account_id))]
    async fn list_wallets(
        &self,
        account_id: &AccountID,
    ) -> Result<Vec<WalletBinding>, ListWalletsError> {
        let wallets = self
            .wallet_repo
            .get_account_wallet_bindings(account_id)
            .await
            .int_err()?;

        Ok(wallets)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%wallet_id))]
    async fn get_wallet(&self, wallet_id: &WalletID) -> Result<WalletBinding, GetWalletError> {
        self.wallet_repo
            .get_wallet_binding(wallet_id)
            .await
            .map_err(|e| match e {
                GetWalletBindingError::NotFound(e) => GetWalletError::NotFound(e),
                GetWalletBindingError::Internal(e) => GetWalletError::Internal(e),
            })
    }

    #[tracing::instrument(level = "debug", skip_all, fields(%account_id))]
    async fn get_primary_wallet(
        &self,
        account_id: &AccountID,
    ) -> Result<Option<WalletBinding>, GetPrimaryWalletError> {
        let wallets = self
            .wallet_repo
            .get_account_wallet_bindings(account_id)
            .await
            .int_err()?;

        Ok(wallets.into_iter().find(|w| w.is_primary))
    }

    #[tracing::instrument(level = "info", skip_all, fields(%account_id, %address, %wallet_type))]
    async fn add_wallet(
        &self,
        account_id: &AccountID,
        address: &WalletAddress,
        wallet_type: WalletType,
    ) -> Result<WalletBinding, AddWalletError> {
        if address.family() != wallet_type.address_family() {
            return Err(AddWalletError::InvalidInput(IncompatibleWalletTypeError {
                address: address.clone(),
                wallet_type,
            }));
        }

        let wallet = WalletBinding::new(
            *account_id,
            address.clone(),
            wallet_type,
            self.time_source.now(),
        );

        let stored = self
            .wallet_repo
            .add_wallet_binding(&wallet)
            .await
            .map_err(|e| match e {
                AddWalletBindingError::Duplicate(e) => AddWalletError::DuplicateAddress(e),
                AddWalletBindingError::AccountNotFound(e) => AddWalletError::AccountNotFound(e),
                AddWalletBindingError::Internal(e) => AddWalletError::Internal(e),
            })?;

        tracing::info!(wallet_id = %stored.id, is_primary = stored.is_primary, "Wallet bound");

        Ok(stored)
    }

    #[tracing::instrument(level = "info", skip_all, fields(%account_id, %wallet_id))]
    async fn set_primary(
        &self,
        account_id: &AccountID,
        wallet_id: &WalletID,
    ) -> Result<(), SetPrimaryWalletError> {
        self.wallet_repo
            .set_primary_wallet_binding(account_id, wallet_id)
            .await
            .map_err(|e| match e {
                SetPrimaryWalletBindingError::NotFound(e) => SetPrimaryWalletError::NotFound(e),
                SetPrimaryWalletBindingError::Internal(e) => SetPrimaryWalletError::Internal(e),
            })
    }

    #[tracing::instrument(level = "info", skip_all, fields(%account_id, %wallet_id))]
    async fn rename_wallet(
        &self,
        account_id: &AccountID,
        wallet_id: &WalletID,
        nickname: Option<String>,
    ) -> Result<WalletBinding, RenameWalletError> {
        let nickname = WalletBinding::normalize_nickname(nickname.as_deref())
            .map_err(RenameWalletError::InvalidNickname)?;

        self.wallet_repo
            .set_wallet_binding_nickname(account_id, wallet_id, nickname)
            .await
            .map_err(|e| match e {
                SetWalletBindingNicknameError::NotFound(e) => RenameWalletError::NotFound(e),
                SetWalletBindingNicknameError::Internal(e) => RenameWalletError::Internal(e),
            })
    }

    #[tracing::instrument(level = "info", skip_all, fields(%wallet_id))]
    async fn remove_wallet(&self, wallet_id: &WalletID) -> Result<(), RemoveWalletError> {
        let wallet = match self.wallet_repo.get_wallet_binding(wallet_id).await {
            Ok(wallet) => wallet,
            Err(GetWalletBindingError::NotFound(e)) => {
                return Err(RemoveWalletError::NotFound(e));
            }
            Err(GetWalletBindingError::Internal(e)) => return Err(e.into()),
        };

        let account = self
            .account_repo
            .get_account_by_id(&wallet.account_id)
            .await
            .int_err()?;

        let removed = self
            .wallet_repo
            .delete_wallet_binding(wallet_id, self.keep_last_wallet(&account))
            .await
            .map_err(|e| match e {
                DeleteWalletBindingError::NotFound(e) => RemoveWalletError::NotFound(e),
                DeleteWalletBindingError::LastWallet(e) => {
                    RemoveWalletError::CannotRemoveLastWallet(e)
                }
                DeleteWalletBindingError::Internal(e) => RemoveWalletError::Internal(e),
            })?;

        tracing::info!(
            account_id = %removed.account_id,
            was_primary = removed.is_primary,
            "Wallet unbound"
        );

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
