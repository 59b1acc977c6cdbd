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
use internal_error::{InternalError, ResultIntoInternal};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn ProvisionWalletAccountUseCase)]
pub struct ProvisionWalletAccountUseCaseImpl {
    account_repo: Arc<dyn AccountRepository>,
    wallet_repo: Arc<dyn WalletBindingRepository>,
    config: Arc<WalletAccountsConfig>,
    time_source: Arc<dyn SystemTimeSource>,
}

impl ProvisionWalletAccountUseCaseImpl {
    async fn find_existing(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<ProvisionedWalletAccount>, InternalError> {
        let Some(wallet) = self
            .wallet_repo
            .find_wallet_binding_by_address(address)
            .await
            .int_err()?
        else {
            return Ok(None);
        };

        let account = self
            .account_repo
            .get_account_by_id(&wallet.account_id)
            .await
            .int_err()?;

        Ok(Some(ProvisionedWalletAccount {
            account,
            wallet,
            is_new_account: false,
        }))
    }

    async fn register(
        &self,
        address: &WalletAddress,
        wallet_type: WalletType,
    ) -> Result<ProvisionedWalletAccount, InternalError> {
        let now = self.time_source.now();

        for username in default_username_candidates(address) {
            let account =
                Account::new_for_wallet(AccountID::new_generated(), username, address, now);
            let wallet = WalletBinding {
                is_primary: true,
                ..WalletBinding::new(account.id, address.clone(), wallet_type, now)
            };

            match self
                .account_repo
                .create_account_with_wallet(&account, &wallet)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        account_id = %account.id,
                        username = %account.username,
                        "Registered account for a new wallet"
                    );
                    return Ok(ProvisionedWalletAccount {
                        account,
                        wallet,
                        is_new_account: true,
                    });
                }
                Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
                    account_field: CreateAccountDuplicateField::WalletAddress,
                })) => {
                    // Another request bound the address first
                    tracing::debug!("Lost account registration race, resolving existing account");

                    return match self.find_existing(address).await? {
                        Some(existing) => Ok(existing),
                        None => InternalError::bail(format!(
                            "Wallet {address} reported as bound but cannot be found"
                        )),
                    };
                }
                Err(CreateAccountError::Duplicate(CreateAccountErrorDuplicate {
                    account_field,
                })) => {
                    tracing::debug!(username = %account.username, %account_field, "Retrying registration");
                }
                Err(CreateAccountError::Internal(e)) => return Err(e),
            }
        }

        InternalError::bail(format!("No free username left for wallet {address}"))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ProvisionWalletAccountUseCase for ProvisionWalletAccountUseCaseImpl {
    #[tracing::instrument(level = "info", skip_all, fields(%address, %wallet_type))]
    async fn execute(
        &self,
        address: &WalletAddress,
        wallet_type: WalletType,
    ) -> Result<ProvisionedWalletAccount, ProvisionWalletAccountError> {
        if let Some(existing) = self.find_existing(address).await? {
            return Ok(existing);
        }

        if !self.config.sign_up_via_wallet {
            return Err(ProvisionWalletAccountError::SignUpDisabled(
                WalletSignUpDisabledError {
                    address: address.clone(),
                },
            ));
        }

        Ok(self.register(address, wallet_type).await?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
