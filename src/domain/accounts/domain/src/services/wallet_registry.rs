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

use crate::{
    AccountID,
    AccountNotFoundByIdError,
    InvalidWalletNicknameError,
    LastWalletBindingError,
    WalletAddress,
    WalletAddressAlreadyBoundError,
    WalletBinding,
    WalletBindingNotFoundError,
    WalletID,
    WalletType,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Manages the set of wallets bound to an account
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait WalletRegistry: Send + Sync {
    async fn list_wallets(&self, account_id: &AccountID)
    -> Result<Vec<WalletBinding>, ListWalletsError>;

    async fn get_wallet(&self, wallet_id: &WalletID) -> Result<WalletBinding, GetWalletError>;

    /// `None` only for accounts without wallets
    async fn get_primary_wallet(
        &self,
        account_id: &AccountID,
    ) -> Result<Option<WalletBinding>, GetPrimaryWalletError>;

    /// Binds `address` to the account. Does not check wallet ownership:
    /// callers must have proven it beforehand.
    async fn add_wallet(
        &self,
        account_id: &AccountID,
        address: &WalletAddress,
        wallet_type: WalletType,
    ) -> Result<WalletBinding, AddWalletError>;

    async fn set_primary(
        &self,
        account_id: &AccountID,
        wallet_id: &WalletID,
    ) -> Result<(), SetPrimaryWalletError>;

    /// Sets or clears (`None` or blank) the nickname of an own wallet
    async fn rename_wallet(
        &self,
        account_id: &AccountID,
        wallet_id: &WalletID,
        nickname: Option<String>,
    ) -> Result<WalletBinding, RenameWalletError>;

    async fn remove_wallet(&self, wallet_id: &WalletID) -> Result<(), RemoveWalletError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ListWalletsError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetWalletError {
    #[error(transparent)]
    NotFound(WalletBindingNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetPrimaryWalletError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum AddWalletError {
    #[error(transparent)]
    InvalidInput(IncompatibleWalletTypeError),

    #[error(transparent)]
    AccountNotFound(AccountNotFoundByIdError),

    #[error(transparent)]
    DuplicateAddress(WalletAddressAlreadyBoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Address '{address}' cannot belong to a {wallet_type} wallet")]
pub struct IncompatibleWalletTypeError {
    pub address: WalletAddress,
    pub wallet_type: WalletType,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SetPrimaryWalletError {
    #[error(transparent)]
    NotFound(WalletBindingNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum RenameWalletError {
    #[error(transparent)]
    NotFound(WalletBindingNotFoundError),

    #[error(transparent)]
    InvalidNickname(InvalidWalletNicknameError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum RemoveWalletError {
    #[error(transparent)]
    NotFound(WalletBindingNotFoundError),

    #[error(transparent)]
    CannotRemoveLastWallet(LastWalletBindingError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
