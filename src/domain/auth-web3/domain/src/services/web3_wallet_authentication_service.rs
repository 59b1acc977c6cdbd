// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts::{
    Account,
    IncompatibleWalletTypeError,
    WalletAddress,
    WalletBinding,
    WalletSignUpDisabledError,
    WalletType,
};
use internal_error::InternalError;
use thiserror::Error;

use crate::{MalformedSignatureError, SessionToken, Web3AuthNonce};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct WalletSignatureProof {
    pub wallet_address: WalletAddress,
    pub wallet_type: WalletType,
    pub nonce: Web3AuthNonce,
    pub signature: String,
}

#[derive(Debug, Clone)]
pub struct WalletAuthenticationResult {
    pub account: Account,
    pub wallet: WalletBinding,
    pub session: SessionToken,
    pub is_new_account: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait Web3WalletAuthenticationService: Send + Sync {
    /// Exchanges a signed challenge for a session, provisioning an account
    /// on the first sign-in of an address. The challenge is consumed on
    /// success.
    async fn authenticate(
        &self,
        proof: WalletSignatureProof,
    ) -> Result<WalletAuthenticationResult, WalletAuthenticationError>;

    /// Checks and consumes a signed challenge without touching accounts.
    /// Used to prove ownership of an address before binding it.
    async fn verify_wallet_ownership(
        &self,
        proof: WalletSignatureProof,
    ) -> Result<(), WalletAuthenticationError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum WalletAuthenticationError {
    #[error(transparent)]
    InvalidInput(IncompatibleWalletTypeError),

    #[error(transparent)]
    UnknownChallenge(UnknownChallengeError),

    #[error(transparent)]
    InvalidSignature(InvalidSignatureError),

    #[error(transparent)]
    SignUpDisabled(WalletSignUpDisabledError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("No pending challenge matches the nonce for wallet '{wallet_address}'")]
pub struct UnknownChallengeError {
    pub wallet_address: WalletAddress,
}

#[derive(Error, Debug)]
pub enum InvalidSignatureError {
    #[error("Signature was not produced by wallet '{wallet_address}'")]
    Mismatch { wallet_address: WalletAddress },

    #[error(transparent)]
    Malformed(MalformedSignatureError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
