// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{Account, WalletAddress, WalletBinding, WalletType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Resolves the account that owns a wallet address, registering a new
/// account with a primary binding when the address was never seen before.
///
/// Safe to call concurrently for the same address: exactly one account is
/// created and every caller resolves to it.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait ProvisionWalletAccountUseCase: Send + Sync {
    async fn execute(
        &self,
        address: &WalletAddress,
        wallet_type: WalletType,
    ) -> Result<ProvisionedWalletAccount, ProvisionWalletAccountError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedWalletAccount {
    pub account: Account,
    pub wallet: WalletBinding,
    pub is_new_account: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ProvisionWalletAccountError {
    #[error(transparent)]
    SignUpDisabled(WalletSignUpDisabledError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Wallet '{address}' is not registered and sign-up via wallet is disabled")]
pub struct WalletSignUpDisabledError {
    pub address: WalletAddress,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
