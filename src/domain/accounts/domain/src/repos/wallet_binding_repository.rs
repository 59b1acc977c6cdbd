// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use internal_error::InternalError;
use thiserror::Error;

use crate::{AccountID, AccountNotFoundByIdError, WalletAddress, WalletBinding, WalletID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Storage of wallet bindings.
///
/// Every mutating operation is atomic with respect to the
/// "exactly one primary binding per account" invariant: concurrent calls
/// can never leave an account with zero or two primary bindings.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait WalletBindingRepository: Send + Sync {
    /// Stores a new binding. The `is_primary` flag of the argument is
    /// ignored: the binding becomes primary only when the account has no
    /// other bindings. Returns the binding as stored.
    async fn add_wallet_binding(
        &self,
        wallet: &WalletBinding,
    ) -> Result<WalletBinding, AddWalletBindingError>;

    async fn get_wallet_binding(
        &self,
        wallet_id: &WalletID,
    ) -> Result<WalletBinding, GetWalletBindingError>;

    async fn find_wallet_binding_by_address(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<WalletBinding>, FindWalletBindingError>;

    /// Primary binding first, the rest by creation time
    async fn get_account_wallet_bindings(
        &self,
        account_id: &AccountID,
    ) -> Result<Vec<WalletBinding>, GetAccountWalletBindingsError>;

    async fn set_primary_wallet_binding(
        &self,
        account_id: &AccountID,
        wallet_id: &WalletID,
    ) -> Result<(), SetPrimaryWalletBindingError>;

    /// Replaces the nickname. A wallet of another account is reported as
    /// missing.
    async fn set_wallet_binding_nickname(
        &self,
        account_id: &AccountID,
        wallet_id: &WalletID,
        nickname: Option<String>,
    ) -> Result<WalletBinding, SetWalletBindingNicknameError>;

    async fn touch_wallet_binding(
        &self,
        wallet_id: &WalletID,
        used_at: DateTime<Utc>,
    ) -> Result<WalletBinding, TouchWalletBindingError>;

    /// Removes a binding. With `keep_last` set, removing the only binding of
    /// an account is refused. When the primary binding is removed, the most
    /// recently used remaining binding becomes primary.
    async fn delete_wallet_binding(
        &self,
        wallet_id: &WalletID,
        keep_last: bool,
    ) -> Result<WalletBinding, DeleteWalletBindingError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum AddWalletBindingError {
    #[error(transparent)]
    Duplicate(WalletAddressAlreadyBoundError),

    #[error(transparent)]
    AccountNotFound(AccountNotFoundByIdError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Wallet address '{address}' is already bound to an account")]
pub struct WalletAddressAlreadyBoundError {
    pub address: WalletAddress,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetWalletBindingError {
    #[error(transparent)]
    NotFound(WalletBindingNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Wallet not found: '{wallet_id}'")]
pub struct WalletBindingNotFoundError {
    pub wallet_id: WalletID,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum FindWalletBindingError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetAccountWalletBindingsError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SetPrimaryWalletBindingError {
    /// Also returned when the wallet is bound to another account
    #[error(transparent)]
    NotFound(WalletBindingNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SetWalletBindingNicknameError {
    #[error(transparent)]
    NotFound(WalletBindingNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum TouchWalletBindingError {
    #[error(transparent)]
    NotFound(WalletBindingNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum DeleteWalletBindingError {
    #[error(transparent)]
    NotFound(WalletBindingNotFoundError),

    #[error(transparent)]
    LastWallet(LastWalletBindingError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Wallet '{wallet_id}' is the last wallet of account '{account_id}'")]
pub struct LastWalletBindingError {
    pub account_id: AccountID,
    pub wallet_id: WalletID,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
