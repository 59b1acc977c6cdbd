// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts::WalletAddress;
use internal_error::InternalError;
use thiserror::Error;

use crate::Web3AuthChallenge;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait Web3NonceService: Send + Sync {
    /// Issues a fresh challenge for the address, invalidating any earlier
    /// one. Accounts are not created at this point.
    async fn issue_challenge(
        &self,
        wallet_address: &WalletAddress,
    ) -> Result<IssuedWeb3AuthChallenge, IssueChallengeError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedWeb3AuthChallenge {
    pub challenge: Web3AuthChallenge,
    /// Exact text the wallet must sign
    pub message: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum IssueChallengeError {
    #[error(transparent)]
    NotFound(UnregisteredWalletError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug)]
#[error("Wallet '{wallet_address}' is not registered")]
pub struct UnregisteredWalletError {
    pub wallet_address: WalletAddress,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
