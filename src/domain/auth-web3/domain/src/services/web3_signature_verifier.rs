// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cryptotrade_accounts::{WalletAddress, WalletType};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Checks that a message was signed by the owner of a wallet address.
///
/// Implementations are pure: no storage or network access.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait Web3SignatureVerifier: Send + Sync {
    fn wallet_type(&self) -> WalletType;

    /// `Ok(false)` when the signature is well-formed but was produced by a
    /// different key or over a different message. An error means the
    /// signature could not be checked at all.
    fn verify(
        &self,
        message: &str,
        signature: &str,
        claimed_address: &WalletAddress,
    ) -> Result<bool, MalformedSignatureError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed signature: {reason}")]
pub struct MalformedSignatureError {
    pub reason: String,
}

impl MalformedSignatureError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
