// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use cryptotrade_accounts::WalletAddress;
use internal_error::InternalError;
use thiserror::Error;

use crate::{Web3AuthChallenge, Web3AuthNonce};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait Web3AuthNonceRepository: Send + Sync {
    /// Stores the challenge, replacing any earlier one for the same address
    async fn set_nonce(&self, challenge: &Web3AuthChallenge) -> Result<(), SetNonceError>;

    async fn get_nonce(
        &self,
        wallet_address: &WalletAddress,
    ) -> Result<Web3AuthChallenge, GetNonceError>;

    /// Replaces the stored challenge for `replacement.wallet_address` only
    /// if its nonce still equals `expected`. Of several concurrent callers
    /// presenting the same nonce, exactly one succeeds.
    async fn rotate_nonce(
        &self,
        expected: &Web3AuthNonce,
        replacement: &Web3AuthChallenge,
    ) -> Result<(), RotateNonceError>;

    /// Returns the number of removed challenges
    async fn cleanup_expired_nonces(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, CleanupExpiredNoncesError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SetNonceError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for SetNonceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetNonceError {
    #[error("nonce not found for wallet: {wallet}")]
    NotFound { wallet: WalletAddress },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for GetNonceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound { wallet: a }, Self::NotFound { wallet: b }) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum RotateNonceError {
    #[error("nonce not found for wallet: {wallet}")]
    NotFound { wallet: WalletAddress },

    #[error("nonce for wallet {wallet} was already rotated")]
    Stale { wallet: WalletAddress },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for RotateNonceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound { wallet: a }, Self::NotFound { wallet: b })
            | (Self::Stale { wallet: a }, Self::Stale { wallet: b }) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CleanupExpiredNoncesError {
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for CleanupExpiredNoncesError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
